//! Value validators and the normalizers built on top of them.
//!
//! Valid option lists mirror the choices on the bounties model of the
//! Gitcoin web application. Membership is exact and case-sensitive.

use std::sync::Arc;

use super::common::FilterValue;
use super::schema::Normalizer;
use crate::Error;

pub const EXPERIENCE_LEVELS: &[&str] = &["Beginner", "Intermediate", "Advanced", "Unknown"];

pub const PROJECT_LENGTHS: &[&str] = &["Hours", "Days", "Weeks", "Months", "Unknown"];

pub const BOUNTY_TYPES: &[&str] = &["Bug", "Security", "Feature", "Unknown"];

pub const IDX_STATUSES: &[&str] = &[
    "cancelled",
    "done",
    "expired",
    "open",
    "started",
    "submitted",
    "unknown",
];

/// Bounty attributes the API can sort by.
pub const ORDER_BY_FIELDS: &[&str] = &[
    "web3_type",
    "title",
    "web3_created",
    "value_in_token",
    "token_name",
    "token_address",
    "bounty_type",
    "project_length",
    "experience_level",
    "github_url",
    "github_comments",
    "bounty_owner_address",
    "bounty_owner_email",
    "bounty_owner_github_username",
    "bounty_owner_name",
    "is_open",
    "expires_date",
    "raw_data",
    "metadata",
    "current_bounty",
    "_val_usd_db",
    "contract_address",
    "network",
    "idx_experience_level",
    "idx_project_length",
    "idx_status",
    "issue_description",
    "standard_bounties_id",
    "num_fulfillments",
    "balance",
    "accepted",
    "interested",
    "interested_comment",
    "submissions_comment",
    "override_status",
    "last_comment_date",
    "fulfillment_accepted_on",
    "fulfillment_submitted_on",
    "fulfillment_started_on",
    "canceled_on",
    "snooze_warnings_for_days",
    "token_value_time_peg",
    "token_value_in_usdt",
    "value_in_usdt_now",
    "value_in_usdt",
    "value_in_eth",
    "value_true",
    "privacy_preferences",
];

/// Returns `value` unchanged if it is one of `options`.
pub fn validate_option(field: &str, options: &[&str], value: &str) -> Result<String, Error> {
    if options.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(Error::validation(field, value))
    }
}

/// Accepts a sortable field name, optionally prefixed with `-` for descending order.
/// The sign is kept in the returned value.
pub fn validate_order_by(options: &[&str], value: &str) -> Result<String, Error> {
    let field = value.strip_prefix('-').unwrap_or(value);
    validate_option("order_by", options, field).map(|_| value.to_string())
}

pub fn experience_level(value: &str) -> Result<String, Error> {
    validate_option("experience_level", EXPERIENCE_LEVELS, value)
}

pub fn project_length(value: &str) -> Result<String, Error> {
    validate_option("project_length", PROJECT_LENGTHS, value)
}

pub fn bounty_type(value: &str) -> Result<String, Error> {
    validate_option("bounty_type", BOUNTY_TYPES, value)
}

pub fn idx_status(value: &str) -> Result<String, Error> {
    validate_option("idx_status", IDX_STATUSES, value)
}

pub fn order_by(value: &str) -> Result<String, Error> {
    validate_order_by(ORDER_BY_FIELDS, value)
}

/// Normalizer accepting only members of `options`.
pub fn one_of(field: &'static str, options: &'static [&'static str]) -> Normalizer {
    Arc::new(move |value: FilterValue| {
        validate_option(field, options, &value.to_string()).map(FilterValue::Text)
    })
}

/// Normalizer for sort specifications over `options`.
pub fn sortable(options: &'static [&'static str]) -> Normalizer {
    Arc::new(move |value: FilterValue| {
        validate_order_by(options, &value.to_string()).map(FilterValue::Text)
    })
}

/// Normalizer accepting integers or decimal strings.
pub fn integer(field: &'static str) -> Normalizer {
    Arc::new(move |value: FilterValue| match value {
        FilterValue::Integer(n) => Ok(FilterValue::Integer(n)),
        FilterValue::Boolean(b) => Ok(FilterValue::Integer(b as i64)),
        FilterValue::Text(s) => s
            .trim()
            .parse::<i64>()
            .map(FilterValue::Integer)
            .map_err(|_| Error::validation(field, &s)),
    })
}

/// Normalizer accepting booleans, `true`/`false` spellings, or `1`/`0`.
pub fn boolean(field: &'static str) -> Normalizer {
    Arc::new(move |value: FilterValue| match value {
        FilterValue::Boolean(b) => Ok(FilterValue::Boolean(b)),
        FilterValue::Integer(0) => Ok(FilterValue::Boolean(false)),
        FilterValue::Integer(1) => Ok(FilterValue::Boolean(true)),
        FilterValue::Integer(n) => Err(Error::validation(field, n)),
        FilterValue::Text(s) => match s.as_str() {
            "true" | "True" | "1" => Ok(FilterValue::Boolean(true)),
            "false" | "False" | "0" => Ok(FilterValue::Boolean(false)),
            _ => Err(Error::validation(field, &s)),
        },
    })
}

/// Normalizer that stringifies any value.
pub fn text() -> Normalizer {
    Arc::new(|value: FilterValue| Ok(FilterValue::Text(value.to_string())))
}
