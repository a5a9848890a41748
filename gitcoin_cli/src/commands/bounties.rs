use anyhow::{anyhow, Result};
use clap::Args;
use gitcoin_api::{Gitcoin, Page, ResourceEndpoint, BOUNTIES, DEFAULT_PER_PAGE};

use crate::output::{
    print_bounties_csv, print_bounties_markdown, print_bounties_table, print_json, OutputFormat,
};

#[derive(Args)]
pub struct BountiesArgs {
    /// Get a single bounty by primary key
    #[arg(long)]
    pub id: Option<i64>,

    /// Filter as NAME=VALUE (repeatable, e.g. bounty_type=Bug)
    #[arg(long, value_parser = parse_key_val)]
    pub filter: Vec<(String, String)>,

    /// Send NAME=VALUE without validation, for fields this client does not know
    #[arg(long, value_parser = parse_key_val)]
    pub raw: Vec<(String, String)>,

    /// Sort field, prefix with '-' for descending (e.g. -web3_created)
    #[arg(long, allow_hyphen_values = true)]
    pub order_by: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: i64,

    /// Fetch without pagination instead of a single page
    #[arg(long, conflicts_with_all = ["page", "per_page"])]
    pub all: bool,

    /// Override the bounties endpoint URL
    #[arg(long)]
    pub url: Option<String>,

    /// Print the request URL without sending it
    #[arg(long)]
    pub dry_run: bool,
}

/// Parses `NAME=VALUE`, splitting on the first `=`.
pub fn parse_key_val(input: &str) -> Result<(String, String)> {
    let (name, value) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got '{}'", input))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("missing field name in '{}'", input));
    }
    Ok((name.to_string(), value.to_string()))
}

fn build_endpoint(args: &BountiesArgs, client: &Gitcoin) -> Result<ResourceEndpoint> {
    let mut client = client.clone();
    if let Some(url) = &args.url {
        client.set_url(BOUNTIES, url);
    }

    let mut endpoint = client.bounties()?;
    for (name, value) in &args.filter {
        endpoint.filter_by(name, value.as_str())?;
    }
    for (name, value) in &args.raw {
        endpoint.add_param_unchecked(name, value.as_str());
    }
    if let Some(order_by) = &args.order_by {
        endpoint.order_by(order_by)?;
    }
    Ok(endpoint)
}

/// The URL the request selected by `args` would hit.
fn dry_run_url(args: &BountiesArgs, endpoint: &ResourceEndpoint) -> Result<String> {
    let url = if let Some(id) = args.id {
        endpoint.get_url(id)?
    } else if args.all {
        endpoint.all_url()?
    } else {
        endpoint.page_url(Page::new(args.page, args.per_page))?
    };
    Ok(url.to_string())
}

pub fn run(args: &BountiesArgs, client: &Gitcoin, format: &OutputFormat) -> Result<()> {
    let mut endpoint = build_endpoint(args, client)?;

    if args.dry_run {
        println!("{}", dry_run_url(args, &endpoint)?);
        return Ok(());
    }

    let resp = if let Some(id) = args.id {
        endpoint.get(id)?
    } else if args.all {
        endpoint.all()?
    } else {
        endpoint.get_page(Page::new(args.page, args.per_page))?
    };

    match format {
        OutputFormat::Table => print_bounties_table(&resp),
        OutputFormat::Json => print_json(&resp),
        OutputFormat::Csv => print_bounties_csv(&resp)?,
        OutputFormat::Markdown => print_bounties_markdown(&resp),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: BountiesArgs,
    }

    #[test]
    fn parse_key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("github_url=https://x.io/?a=b").unwrap(),
            ("github_url".to_string(), "https://x.io/?a=b".to_string())
        );
        assert_eq!(
            parse_key_val("network=").unwrap(),
            ("network".to_string(), String::new())
        );
    }

    #[test]
    fn parse_key_val_rejects_malformed() {
        assert!(parse_key_val("bounty_type").is_err());
        assert!(parse_key_val("=Bug").is_err());
    }

    #[test]
    fn args_collect_repeated_filters() {
        let cli = TestCli::parse_from([
            "gitcoin",
            "--filter",
            "bounty_type=Feature",
            "--filter",
            "bounty_type=Bug",
            "--order-by",
            "-web3_created",
            "--page",
            "3",
            "--per-page",
            "10",
        ]);
        assert_eq!(cli.args.filter.len(), 2);
        assert_eq!(cli.args.filter[1].1, "Bug");
        assert_eq!(cli.args.order_by.as_deref(), Some("-web3_created"));
        assert_eq!(cli.args.page, 3);
        assert_eq!(cli.args.per_page, 10);
        assert!(!cli.args.all);
    }

    #[test]
    fn all_conflicts_with_page() {
        let result = TestCli::try_parse_from(["gitcoin", "--all", "--page", "2"]);
        assert!(result.is_err());
    }

    #[test]
    fn dry_run_builds_without_sending() {
        let cli = TestCli::parse_from([
            "gitcoin",
            "--filter",
            "idx_status=open",
            "--dry-run",
            "--url",
            "http://127.0.0.1:9/bounties/",
        ]);
        run(&cli.args, &Gitcoin::new(), &OutputFormat::Json).unwrap();
    }

    fn dry_run_url_for(argv: &[&str]) -> String {
        let cli = TestCli::parse_from(argv.iter().copied());
        let endpoint = build_endpoint(&cli.args, &Gitcoin::new()).unwrap();
        dry_run_url(&cli.args, &endpoint).unwrap()
    }

    #[test]
    fn dry_run_url_includes_default_page() {
        assert_eq!(
            dry_run_url_for(&["gitcoin", "--filter", "idx_status=open", "--dry-run"]),
            "https://gitcoin.co/api/v0.1/bounties/?idx_status=open&limit=25&offset=0"
        );
    }

    #[test]
    fn dry_run_url_for_id_skips_pagination() {
        assert_eq!(
            dry_run_url_for(&["gitcoin", "--id", "5", "--filter", "idx_status=open", "--dry-run"]),
            "https://gitcoin.co/api/v0.1/bounties/5?idx_status=open"
        );
    }

    #[test]
    fn dry_run_url_for_all() {
        assert_eq!(
            dry_run_url_for(&["gitcoin", "--all", "--url", "http://127.0.0.1:9/b/", "--dry-run"]),
            "http://127.0.0.1:9/b/"
        );
    }

    #[test]
    fn dry_run_rejects_overflowing_page() {
        let cli = TestCli::parse_from([
            "gitcoin",
            "--page",
            "9223372036854775807",
            "--per-page",
            "2",
            "--dry-run",
        ]);
        assert!(run(&cli.args, &Gitcoin::new(), &OutputFormat::Json).is_err());
    }

    #[test]
    fn invalid_filter_is_reported() {
        let cli = TestCli::parse_from(["gitcoin", "--filter", "bounty_type=Epic", "--dry-run"]);
        let err = run(&cli.args, &Gitcoin::new(), &OutputFormat::Json).unwrap_err();
        assert!(err.to_string().contains("bounty_type"));
    }
}
