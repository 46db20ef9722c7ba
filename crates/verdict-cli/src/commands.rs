use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tracing::warn;
use verdict_diff::{diff_report, verify, DiffError, DiffLine, DiffReport, RuleChain};
use verdict_tree::TreeValue;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, &cli.format),
        Command::Verify(args) => cmd_verify(args),
        Command::Canon(args) => cmd_canon(args),
    }
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let expected = load_tree(&args.expected)?;
    let actual = load_tree(&args.actual)?;
    let chain = chain_from(&args.rules);
    let report = diff_report(&expected, &actual, &chain)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text if report.is_empty() => {
            println!("{} No differences.", "✓".green().bold());
        }
        OutputFormat::Text => print_report(&report),
    }
    if !report.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_verify(args: VerifyArgs) -> anyhow::Result<()> {
    let expected = load_tree(&args.expected)?;
    let actual = load_tree(&args.actual)?;
    let chain = chain_from(&args.rules);
    match verify(&expected, &actual, &chain, args.summary.as_deref()) {
        Ok(()) => {
            println!("{} Documents match.", "✓".green().bold());
            Ok(())
        }
        Err(err @ DiffError::Mismatch { .. }) => {
            eprint!("{} {err}", "✗".red().bold());
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn cmd_canon(args: CanonArgs) -> anyhow::Result<()> {
    if args.html {
        let input =
            fs::read_to_string(&args.file).with_context(|| format!("reading {}", args.file))?;
        println!("{}", verdict_html::canonicalize(&input));
    } else {
        let tree = load_tree(&args.file)?;
        println!("{}", verdict_diff::to_text(&tree));
    }
    Ok(())
}

fn print_report(report: &DiffReport) {
    for line in &report.lines {
        match line {
            DiffLine::Unchanged(text) => println!(" {text}"),
            DiffLine::Inserted(text) => println!("{}", format!("+{text}").green()),
            DiffLine::Deleted(text) => println!("{}", format!("-{text}").red()),
        }
    }
}

/// `.json` files are parsed as JSON, everything else as YAML.
fn load_tree(path: &str) -> anyhow::Result<TreeValue> {
    let input = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    if Path::new(path).extension().is_some_and(|ext| ext == "json") {
        return TreeValue::from_json_str(&input).with_context(|| format!("parsing {path}"));
    }
    let tree = verdict_yaml::Converter::new()
        .on_duplicate_key(|key| warn!(key, "duplicate mapping key"))
        .convert(&input)
        .with_context(|| format!("parsing {path}"))?;
    tree.ok_or_else(|| anyhow::anyhow!("{path}: empty document"))
}

fn chain_from(flags: &RuleFlags) -> RuleChain {
    if flags.standard {
        return RuleChain::standard();
    }
    let mut chain = RuleChain::new();
    if flags.ignore_nulls {
        chain = chain.ignoring_nulls();
    }
    if flags.negate {
        chain = chain.negating();
    }
    if flags.regex {
        chain = chain.matching_regexes();
    }
    if flags.wildcard {
        chain = chain.matching_wildcards();
    }
    if flags.ignore_extra_keys {
        chain = chain.ignoring_extra_keys();
    }
    if flags.nested_json {
        chain = chain.comparing_nested_json();
    }
    if flags.nested_html {
        chain = chain.canonicalizing_html();
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn flags(args: &[&str]) -> RuleFlags {
        let mut argv = vec!["verdict", "diff", "a", "b"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Diff(args) => args.rules,
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn no_flags_build_an_empty_chain() {
        assert!(chain_from(&flags(&[])).is_empty());
    }

    #[test]
    fn standard_flag_builds_the_full_chain() {
        assert_eq!(chain_from(&flags(&["--standard"])).len(), 7);
    }

    #[test]
    fn individual_flags_accumulate() {
        let chain = chain_from(&flags(&["--ignore-nulls", "--regex", "--nested-json"]));
        assert_eq!(chain.len(), 3);
    }
}
