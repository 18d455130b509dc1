//! Schemas for every action record attached to an investigation.

use super::{option, CardSpec, EntitySchema, FieldSpec, SelectOption, SubListSpec};

const REMARKS: FieldSpec = FieldSpec::notes("remarks", "Remarks").max(2000);

const GST_SECTIONS: &[SelectOption] = &[
    option("73", "Section 73"),
    option("74", "Section 74"),
    option("76", "Section 76"),
    option("122", "Section 122"),
    option("125", "Section 125"),
];

const NOTICEE_ROLES: &[SelectOption] = &[
    option("taxpayer", "Taxpayer"),
    option("director", "Director"),
    option("partner", "Partner"),
    option("proprietor", "Proprietor"),
    option("other", "Other"),
];

const DRC_FORMS: &[SelectOption] = &[
    option("DRC-01", "DRC-01"),
    option("DRC-01A", "DRC-01A"),
    option("DRC-03", "DRC-03"),
    option("DRC-07", "DRC-07"),
];

const RECOVERY_MODES: &[SelectOption] = &[
    option("cash", "Cash"),
    option("itc", "Input tax credit"),
    option("drc03", "DRC-03 voluntary"),
    option("attachment", "Attachment"),
];

const ITC_RULES: &[SelectOption] = &[
    option("86A", "Rule 86A"),
    option("86B", "Rule 86B"),
];

const PERSON_ROLES: &[SelectOption] = &[
    option("director", "Director"),
    option("partner", "Partner"),
    option("proprietor", "Proprietor"),
    option("employee", "Employee"),
    option("accountant", "Accountant"),
    option("other", "Other"),
];

pub static INSPECTION: EntitySchema = EntitySchema {
    slug: "inspections",
    resource: "inspections",
    title: "Inspections",
    singular: "Inspection",
    fields: &[
        FieldSpec::date("inspection_date", "Date of inspection").required(),
        FieldSpec::text("place_of_inspection", "Place of inspection").required().max(255),
        FieldSpec::text("authorization_number", "Authorization (INS-01) number").max(50),
        REMARKS,
    ],
    sub_lists: &[SubListSpec {
        key: "officers",
        label: "Officers",
        item_label: "Officer",
        fields: &[
            FieldSpec::text("name", "Name").required().max(100),
            FieldSpec::text("designation", "Designation").max(100),
        ],
        children: &[],
    }],
    card: CardSpec {
        title_key: "place_of_inspection",
        date_key: Some("inspection_date"),
        amount_key: None,
    },
};

pub static SEARCH: EntitySchema = EntitySchema {
    slug: "searches",
    resource: "searches",
    title: "Searches",
    singular: "Search",
    fields: &[
        FieldSpec::date("search_date", "Date of search").required(),
        FieldSpec::text("premises", "Premises searched").required().max(255),
        FieldSpec::text("warrant_number", "Warrant number").max(50),
        FieldSpec::notes("outcome", "Outcome").max(2000),
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "premises",
        date_key: Some("search_date"),
        amount_key: None,
    },
};

pub static SEIZURE: EntitySchema = EntitySchema {
    slug: "seizures",
    resource: "seizures",
    title: "Seizures",
    singular: "Seizure",
    fields: &[
        FieldSpec::date("seizure_date", "Date of seizure").required(),
        FieldSpec::notes("goods_description", "Goods / documents seized").required().max(2000),
        FieldSpec::number("quantity", "Quantity"),
        FieldSpec::amount("estimated_value", "Estimated value"),
        FieldSpec::text("place_of_seizure", "Place of seizure").max(255),
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "goods_description",
        date_key: Some("seizure_date"),
        amount_key: Some("estimated_value"),
    },
};

pub static SUMMONS: EntitySchema = EntitySchema {
    slug: "summons",
    resource: "summons",
    title: "Summons",
    singular: "Summons",
    fields: &[
        FieldSpec::date("summons_date", "Date of summons").required(),
        FieldSpec::text("person_summoned", "Person summoned").required().max(100),
        FieldSpec::date("appearance_date", "Date of appearance"),
        FieldSpec::notes("purpose", "Purpose").max(1000),
    ],
    sub_lists: &[SubListSpec {
        key: "statements",
        label: "Statements",
        item_label: "Statement",
        fields: &[
            FieldSpec::date("statement_date", "Date recorded").required(),
            FieldSpec::text("recorded_by", "Recorded by").max(100),
            FieldSpec::notes("summary", "Summary").max(2000),
        ],
        children: &[SubListSpec {
            key: "documents",
            label: "Documents submitted",
            item_label: "Document",
            fields: &[
                FieldSpec::text("document_name", "Document").required().max(200),
                FieldSpec::number("pages", "Pages"),
            ],
            children: &[],
        }],
    }],
    card: CardSpec {
        title_key: "person_summoned",
        date_key: Some("summons_date"),
        amount_key: None,
    },
};

pub static SCN: EntitySchema = EntitySchema {
    slug: "scns",
    resource: "scns",
    title: "Show cause notices",
    singular: "SCN",
    fields: &[
        FieldSpec::text("scn_number", "SCN number").required().max(50),
        FieldSpec::date("scn_date", "Date of issue").required(),
        FieldSpec::select("section", "Section", GST_SECTIONS),
        FieldSpec::amount("tax_amount", "Tax demanded").required(),
        FieldSpec::amount("interest_amount", "Interest"),
        FieldSpec::amount("penalty_amount", "Penalty"),
        FieldSpec::date("reply_due_date", "Reply due by"),
    ],
    sub_lists: &[SubListSpec {
        key: "noticees",
        label: "Noticees",
        item_label: "Noticee",
        fields: &[
            FieldSpec::text("name", "Name").required().max(100),
            FieldSpec::text("gstin", "GSTIN / PAN").max(15),
            FieldSpec::select("role", "Role", NOTICEE_ROLES),
        ],
        children: &[],
    }],
    card: CardSpec {
        title_key: "scn_number",
        date_key: Some("scn_date"),
        amount_key: Some("tax_amount"),
    },
};

pub static DRC: EntitySchema = EntitySchema {
    slug: "drcs",
    resource: "drcs",
    title: "DRC forms",
    singular: "DRC",
    fields: &[
        FieldSpec::select("form_type", "Form", DRC_FORMS).required(),
        FieldSpec::date("drc_date", "Date").required(),
        FieldSpec::amount("amount", "Amount").required(),
        FieldSpec::text("reference_number", "Reference number").max(50),
        REMARKS,
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "form_type",
        date_key: Some("drc_date"),
        amount_key: Some("amount"),
    },
};

pub static RECOVERY: EntitySchema = EntitySchema {
    slug: "recoveries",
    resource: "recoveries",
    title: "Recoveries",
    singular: "Recovery",
    fields: &[
        FieldSpec::date("recovery_date", "Date of recovery").required(),
        FieldSpec::select("mode", "Mode", RECOVERY_MODES).required(),
        FieldSpec::amount("tax", "Tax").required(),
        FieldSpec::amount("interest", "Interest"),
        FieldSpec::amount("penalty", "Penalty"),
        FieldSpec::text("challan_number", "Challan / ARN").max(50),
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "mode",
        date_key: Some("recovery_date"),
        amount_key: Some("tax"),
    },
};

/// Detection and quantification are the same backend resource; the detection
/// fields are the current ones.
pub static QUANTIFICATION: EntitySchema = EntitySchema {
    slug: "quantifications",
    resource: "quantifications",
    title: "Detection / quantification",
    singular: "Detection",
    fields: &[
        FieldSpec::date("detection_date", "Date of detection").required(),
        FieldSpec::amount("tax_detected", "Tax detected").required(),
        FieldSpec::amount("interest", "Interest"),
        FieldSpec::amount("penalty", "Penalty"),
        FieldSpec::date("period_from", "Period from"),
        FieldSpec::date("period_to", "Period to"),
        REMARKS,
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "detection_date",
        date_key: Some("detection_date"),
        amount_key: Some("tax_detected"),
    },
};

pub static ADVISORY: EntitySchema = EntitySchema {
    slug: "advisories",
    resource: "advisories",
    title: "Advisories",
    singular: "Advisory",
    fields: &[
        FieldSpec::date("advisory_issued_date", "Date of advisory").required(),
        FieldSpec::amount("amount", "Amount").required(),
        FieldSpec::date("paid_date", "Date paid"),
        REMARKS,
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "remarks",
        date_key: Some("advisory_issued_date"),
        amount_key: Some("amount"),
    },
};

pub static ITC_BLOCK: EntitySchema = EntitySchema {
    slug: "itc",
    resource: "itc_blocks",
    title: "ITC block / unblock",
    singular: "ITC block",
    fields: &[
        FieldSpec::date("block_date", "Date blocked").required(),
        FieldSpec::amount("amount", "Amount blocked").required(),
        FieldSpec::select("rule", "Rule", ITC_RULES),
        FieldSpec::date("unblock_date", "Date unblocked"),
        FieldSpec::amount("unblock_amount", "Amount unblocked"),
        REMARKS,
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "rule",
        date_key: Some("block_date"),
        amount_key: Some("amount"),
    },
};

pub static LETTER: EntitySchema = EntitySchema {
    slug: "letters",
    resource: "letters",
    title: "Letters to other formations",
    singular: "Letter",
    fields: &[
        FieldSpec::date("letter_date", "Date of letter").required(),
        FieldSpec::text("formation_name", "Formation").required().max(200),
        FieldSpec::text("subject", "Subject").required().max(255),
        FieldSpec::text("reference_number", "Reference number").max(50),
        FieldSpec::date("reply_received_date", "Reply received on"),
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "formation_name",
        date_key: Some("letter_date"),
        amount_key: None,
    },
};

pub static INVOLVED_PERSON: EntitySchema = EntitySchema {
    slug: "involved-persons",
    resource: "involved_persons",
    title: "Involved persons",
    singular: "Involved person",
    fields: &[
        FieldSpec::text("name", "Name").required().max(100),
        FieldSpec::select("role", "Role", PERSON_ROLES).required(),
        FieldSpec::text("pan", "PAN").max(10),
        FieldSpec::text("mobile", "Mobile").max(10),
        FieldSpec::notes("address", "Address").max(500),
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "name",
        date_key: None,
        amount_key: None,
    },
};

pub static ARREST: EntitySchema = EntitySchema {
    slug: "arrests",
    resource: "arrests",
    title: "Arrests",
    singular: "Arrest",
    fields: &[
        FieldSpec::date("arrest_date", "Date of arrest").required(),
        FieldSpec::text("person_name", "Person arrested").required().max(100),
        FieldSpec::text("section", "Section invoked").max(50),
        FieldSpec::date("bail_date", "Date of bail"),
        REMARKS,
    ],
    sub_lists: &[],
    card: CardSpec {
        title_key: "person_name",
        date_key: Some("arrest_date"),
        amount_key: None,
    },
};

static ACTIONS: [&EntitySchema; 13] = [
    &INSPECTION,
    &SEARCH,
    &SEIZURE,
    &SUMMONS,
    &SCN,
    &DRC,
    &RECOVERY,
    &QUANTIFICATION,
    &ADVISORY,
    &ITC_BLOCK,
    &LETTER,
    &INVOLVED_PERSON,
    &ARREST,
];

/// Action-record schemas in the order their tabs are shown.
pub fn action_schemas() -> &'static [&'static EntitySchema] {
    &ACTIONS
}

pub fn by_slug(slug: &str) -> Option<&'static EntitySchema> {
    ACTIONS.iter().copied().find(|schema| schema.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugs_and_resources_are_unique() {
        let slugs: HashSet<_> = action_schemas().iter().map(|s| s.slug).collect();
        let resources: HashSet<_> = action_schemas().iter().map(|s| s.resource).collect();
        assert_eq!(slugs.len(), action_schemas().len());
        assert_eq!(resources.len(), action_schemas().len());
    }

    #[test]
    fn every_schema_is_well_formed() {
        for schema in action_schemas() {
            assert!(
                schema.required_field_count() > 0,
                "{} has no required fields",
                schema.slug
            );
            for key in [Some(schema.card.title_key), schema.card.date_key, schema.card.amount_key]
                .into_iter()
                .flatten()
            {
                assert!(schema.field(key).is_some(), "{}: card key {}", schema.slug, key);
            }
            let keys: HashSet<_> = schema.fields.iter().map(|f| f.key).collect();
            assert_eq!(keys.len(), schema.fields.len(), "{} repeats a key", schema.slug);
            assert!(!keys.contains("investigation"));
            assert!(!keys.contains("id"));
        }
    }
}
