//! Declarative field schemas.
//!
//! A schema says which fields a record has, how each is edited and validated, which
//! nested one-to-many lists it carries, and how its list card is summarized. The CRUD
//! panel, its forms and its detail grid are all derived from these descriptions, so
//! adding a record type means adding a schema in [`entities`], nothing else.

pub mod entities;
pub mod registration;

pub use entities::{action_schemas, by_slug};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

pub const fn option(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Email,
    /// Plain number (counts, quantities, pages).
    Number,
    /// Rupee amount, displayed as currency.
    Amount,
    /// `yyyy-mm-dd`.
    Date,
    TextArea,
    Select(&'static [SelectOption]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub input: InputKind,
    pub required: bool,
    pub max_length: Option<u32>,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, input: InputKind) -> Self {
        Self {
            key,
            label,
            input,
            required: false,
            max_length: None,
        }
    }

    pub const fn text(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, InputKind::Text)
    }

    pub const fn date(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, InputKind::Date)
    }

    pub const fn amount(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, InputKind::Amount)
    }

    pub const fn number(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, InputKind::Number)
    }

    pub const fn notes(key: &'static str, label: &'static str) -> Self {
        Self::new(key, label, InputKind::TextArea)
    }

    pub const fn select(
        key: &'static str,
        label: &'static str,
        options: &'static [SelectOption],
    ) -> Self {
        Self::new(key, label, InputKind::Select(options))
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn max(self, max_length: u32) -> Self {
        Self {
            max_length: Some(max_length),
            ..self
        }
    }
}

/// A nested one-to-many list edited inline with its parent.
#[derive(Debug, PartialEq, Eq)]
pub struct SubListSpec {
    pub key: &'static str,
    pub label: &'static str,
    /// Heading for a single row, e.g. "Officer".
    pub item_label: &'static str,
    pub fields: &'static [FieldSpec],
    pub children: &'static [SubListSpec],
}

/// How a record is summarized on a list card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSpec {
    pub title_key: &'static str,
    pub date_key: Option<&'static str>,
    pub amount_key: Option<&'static str>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EntitySchema {
    /// Tab identifier used in the UI.
    pub slug: &'static str,
    /// Path segment under `investigation/`.
    pub resource: &'static str,
    /// Plural heading.
    pub title: &'static str,
    /// Singular noun used in buttons and notifications.
    pub singular: &'static str,
    pub fields: &'static [FieldSpec],
    pub sub_lists: &'static [SubListSpec],
    pub card: CardSpec,
}

impl EntitySchema {
    pub fn field(&self, key: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Finds the list spec `key` below the row addressed by `path`.
    pub fn sub_list(&self, path: &[(&'static str, usize)], key: &str) -> Option<&'static SubListSpec> {
        let mut lists = self.sub_lists;
        for (segment, _) in path {
            lists = lists.iter().find(|list| list.key == *segment)?.children;
        }
        lists.iter().find(|list| list.key == key)
    }

    /// Every required field across the record and its nested lists.
    #[cfg(test)]
    pub fn required_field_count(&self) -> usize {
        fn count(fields: &[FieldSpec], lists: &[SubListSpec]) -> usize {
            fields.iter().filter(|f| f.required).count()
                + lists
                    .iter()
                    .map(|list| count(list.fields, list.children))
                    .sum::<usize>()
        }
        count(self.fields, self.sub_lists)
    }
}
