//! Filters accepted by the `bounties` endpoint.

use super::schema::{FieldRule, FieldSchema};
use super::validation::{
    boolean, integer, one_of, sortable, text, BOUNTY_TYPES, EXPERIENCE_LEVELS, IDX_STATUSES,
    ORDER_BY_FIELDS, PROJECT_LENGTHS,
};

/// Builds a fresh schema for the bounties list endpoint.
pub fn bounty_schema() -> FieldSchema {
    FieldSchema::new()
        .with_field(
            "experience_level",
            FieldRule::multi(one_of("experience_level", EXPERIENCE_LEVELS)),
        )
        .with_field(
            "project_length",
            FieldRule::multi(one_of("project_length", PROJECT_LENGTHS)),
        )
        .with_field(
            "bounty_type",
            FieldRule::multi(one_of("bounty_type", BOUNTY_TYPES)),
        )
        .with_field("bounty_owner_address", FieldRule::multi(text()))
        .with_field("bounty_owner_github_username", FieldRule::multi(text()))
        .with_field(
            "idx_status",
            FieldRule::multi(one_of("idx_status", IDX_STATUSES)),
        )
        .with_field("network", FieldRule::multi(text()))
        .with_field(
            "standard_bounties_id",
            FieldRule::multi(integer("standard_bounties_id")),
        )
        .with_field("pk__gt", FieldRule::single(integer("pk__gt")))
        .with_field("started", FieldRule::single(text()))
        .with_field("is_open", FieldRule::single(boolean("is_open")))
        .with_field("github_url", FieldRule::multi(text()))
        .with_field("fulfiller_github_username", FieldRule::single(text()))
        .with_field("interested_github_username", FieldRule::single(text()))
        .with_field("raw_data", FieldRule::multi(text()))
        .with_field("order_by", FieldRule::single(sortable(ORDER_BY_FIELDS)))
        .with_field("limit", FieldRule::single(integer("limit")))
        .with_field("offset", FieldRule::single(integer("offset")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounty_schema_fields() {
        let schema = bounty_schema();
        assert_eq!(schema.len(), 18);
        for name in ["bounty_type", "idx_status", "github_url", "raw_data", "network"] {
            assert!(schema.get(name).unwrap().multi_valued, "{} should accumulate", name);
        }
        for name in ["order_by", "limit", "offset", "pk__gt", "is_open", "started"] {
            assert!(!schema.get(name).unwrap().multi_valued, "{} should replace", name);
        }
    }

    #[test]
    fn each_call_builds_a_new_schema() {
        let mut first = bounty_schema();
        first.insert("no_normalize", FieldRule::new(true, None));
        assert!(!bounty_schema().has("no_normalize"));
    }
}
