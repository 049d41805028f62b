use lazy_static::lazy_static;
use regex::Regex;
use validator::{Validate, ValidationErrors};

use crate::shared::types::FieldError;

lazy_static! {
    /// Regex for warranty phone fields (customer phone, detailer mobile)
    /// Optional leading plus, then digits, whitespace or hyphens
    /// - Valid: "+919876543210", "98765 43210", "040-1234-5678"
    /// - Invalid: "98765abc", "(040) 1234", "++91"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^[+]?[\d\s-]+$").unwrap();

    /// Regex for the contact form phone field, which also accepts parentheses
    /// - Valid: "(040) 2345 6789", "+91 98765-43210"
    /// - Invalid: "call me", "98765.43210"
    pub static ref CONTACT_PHONE_REGEX: Regex = Regex::new(r"^[+]?[\d\s()-]+$").unwrap();
}

/// A rule set whose errors are reported in a fixed field order
pub trait Schema: Validate {
    /// Wire names of the fields, in declaration order
    const FIELD_ORDER: &'static [&'static str];

    /// Run every rule and return all violations, ordered by field then rule
    fn check(&self) -> Result<(), Vec<FieldError>> {
        self.validate()
            .map_err(|errors| ordered_field_errors(&errors, Self::FIELD_ORDER))
    }
}

/// Flatten validator output into a deterministic list of field errors
pub fn ordered_field_errors(errors: &ValidationErrors, field_order: &[&str]) -> Vec<FieldError> {
    let mut fields: Vec<(String, Vec<FieldError>)> = errors
        .field_errors()
        .iter()
        .map(|(name, errs)| {
            let field = to_camel_case(name.as_ref());
            let entries = errs
                .iter()
                .map(|err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                    FieldError::new(field.clone(), message)
                })
                .collect();
            (field, entries)
        })
        .collect();

    let rank = |field: &str| {
        field_order
            .iter()
            .position(|f| *f == field)
            .unwrap_or(field_order.len())
    };
    fields.sort_by(|(a, _), (b, _)| rank(a).cmp(&rank(b)).then_with(|| a.cmp(b)));

    fields.into_iter().flat_map(|(_, entries)| entries).collect()
}

/// `detailer_mobile` -> `detailerMobile`; already camelCase input is returned unchanged
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for ch in name.chars() {
        if ch == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}
