use common::model::investigation::Division;
use common::registration::Registration;

use crate::helpers::compute_md5;

pub struct RegistrationForm {
    pub form: Registration,
    /// Division tree for the cascading selects; empty until loaded.
    pub divisions: Vec<Division>,
    pub divisions_error: Option<String>,
    /// Digest of the blank form's payload, for dirty detection.
    pub pristine_md5: String,
}

impl RegistrationForm {
    pub fn new() -> Self {
        let form = Registration::default();
        let pristine_md5 = compute_md5(&form.payload().to_string());
        Self {
            form,
            divisions: Vec::new(),
            divisions_error: None,
            pristine_md5,
        }
    }

    pub fn is_dirty(&self) -> bool {
        compute_md5(&self.form.payload().to_string()) != self.pristine_md5
    }

    /// Cascading selects are used once the division tree is available; otherwise
    /// division and range are typed in.
    pub fn has_division_tree(&self) -> bool {
        !self.divisions.is_empty()
    }
}
