//! Field sets of the investigation registration form.
//!
//! The form is one logical record split into three tabs. Investigation fields go at the
//! top level of the payload; taxpayer and jurisdiction fields together make up the
//! single embedded taxpayer.

use super::{option, FieldSpec, SelectOption};

pub const SOURCES: &[SelectOption] = &[
    option("intelligence", "Intelligence"),
    option("dgarm", "DGARM / analytics"),
    option("audit", "Audit"),
    option("complaint", "Complaint"),
    option("reference", "Reference from other formation"),
    option("suo_motu", "Suo motu"),
];

pub const INVESTIGATION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("file_number", "File number").required().max(50),
    FieldSpec::select("source", "Source", SOURCES).required(),
    FieldSpec::date("date_of_receipt", "Date of receipt").required(),
    FieldSpec::date("date_of_initiation", "Date of initiation"),
    FieldSpec::text("assigned_officer", "Assigned officer").max(100),
    FieldSpec::text("nature_of_offence", "Nature of offence").required().max(255),
    FieldSpec::text("period_involved", "Period involved").max(50),
    FieldSpec::notes("remarks", "Remarks").max(2000),
];

pub const TAXPAYER_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("gstin", "GSTIN").required().max(15),
    FieldSpec::text("name", "Legal name").required().max(200),
    FieldSpec::text("trade_name", "Trade name").max(200),
    FieldSpec::notes("address", "Principal place of business").max(500),
    FieldSpec::new("email", "Email", super::InputKind::Email).max(100),
    FieldSpec::text("mobile", "Mobile").max(10),
];

/// Division and range are picked from the cascading dropdowns; these specs carry
/// their labels and validation only.
pub const JURISDICTION_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("division_name", "Division").required().max(100),
    FieldSpec::text("range_name", "Range").required().max(100),
];

pub const DIVISION_KEY: &str = "division_name";
pub const RANGE_KEY: &str = "range_name";
