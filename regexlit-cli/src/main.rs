use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use log::{debug, info};
use regexlit::{LiteralConfig, Match, Numbering, Options, Pattern, PatternBuilder};

#[derive(Parser)]
#[command(name = "regexlit")]
#[command(about = "regexlit - regex literals with named capture groups")]
#[command(version)]
struct Cli {
    /// Accept known-unsupported flags (by default `g`, `u`, `y`)
    #[arg(long, global = true)]
    allow_unsupported: bool,
    /// Replace the set of known-unsupported flags
    #[arg(long, global = true, value_name = "CHARS")]
    unsupported: Option<String>,
    /// How groups such as `(?:...)` are numbered
    #[arg(long, global = true, value_enum, default_value_t = NumberingArg::Source)]
    numbering: NumberingArg,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum NumberingArg {
    /// Every parenthesis takes an index
    Source,
    /// Only capturing groups take an index
    Capturing,
}

impl From<NumberingArg> for Numbering {
    fn from(arg: NumberingArg) -> Self {
        match arg {
            NumberingArg::Source => Numbering::Source,
            NumberingArg::Capturing => Numbering::Capturing,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Test a pattern literal against input
    Test {
        /// The pattern literal, e.g. `/(?<word>\w+)/i`
        pattern: String,
        /// The input string to test
        input: String,
        /// Show detailed match information
        #[arg(short, long)]
        verbose: bool,
    },
    /// Find all matches in input
    Find {
        /// The pattern literal
        pattern: String,
        /// The input string
        input: String,
    },
    /// Check if pattern matches
    Match {
        /// The pattern literal
        pattern: String,
        /// The input string
        input: String,
    },
    /// Show the capture groups found in a pattern
    Groups {
        /// The pattern literal
        pattern: String,
    },
    /// Replace every match using a template (`$1`, `${name}`)
    Replace {
        /// The pattern literal
        pattern: String,
        /// The input string
        input: String,
        /// The replacement template
        template: String,
    },
    /// Show the canonical form of a flag string
    Flags {
        /// Flag characters, e.g. `mi`
        flags: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let builder = builder(&cli);

    match cli.command {
        Commands::Test {
            pattern,
            input,
            verbose,
        } => cmd_test(&compile(&builder, &pattern), &input, verbose),
        Commands::Find { pattern, input } => cmd_find(&compile(&builder, &pattern), &input),
        Commands::Match { pattern, input } => cmd_match(&compile(&builder, &pattern), &input),
        Commands::Groups { pattern } => cmd_groups(&compile(&builder, &pattern)),
        Commands::Replace {
            pattern,
            input,
            template,
        } => cmd_replace(&compile(&builder, &pattern), &input, &template),
        Commands::Flags { flags } => cmd_flags(&flags),
    }
}

fn builder(cli: &Cli) -> PatternBuilder {
    let mut config = LiteralConfig::new().allow_known_unsupported(cli.allow_unsupported);
    if let Some(chars) = &cli.unsupported {
        config = config.known_unsupported(chars.chars());
    }
    PatternBuilder::new()
        .literal_config(config)
        .numbering(cli.numbering.into())
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "Error:".red().bold(), e);
    std::process::exit(1);
}

fn compile(builder: &PatternBuilder, literal: &str) -> Pattern {
    let pattern = builder.parse(literal).unwrap_or_else(|e| fail(e));
    debug!(
        "literal {:?} -> body {:?}, flags {:?}, {} named group(s)",
        literal,
        pattern.as_str(),
        pattern.parsed_flags(),
        pattern.group_names().len()
    );
    pattern
}

fn print_groups(m: &Match<'_>) {
    println!("{}", "Capture groups:".bold());
    for idx in 1..m.len() {
        match m.range_at(idx) {
            Some(r) => println!(
                "  Group {}: {}..{} = {}",
                idx,
                r.start,
                r.end,
                m.subject()[r.clone()].green()
            ),
            None => println!("  Group {}: {}", idx, "-".dimmed()),
        }
    }
    let names = m.capture_group_names();
    if !names.is_empty() {
        println!();
        println!("{}", "Named groups:".bold());
        for name in names {
            match m.value_named(name) {
                Some(value) => println!("  {}: {}", name.cyan(), value.green()),
                None => println!("  {}: {}", name.cyan(), "-".dimmed()),
            }
        }
    }
}

fn cmd_test(pattern: &Pattern, input: &str, verbose: bool) {
    println!("{}", "Testing pattern...".bold());
    println!("  Pattern: {}", pattern.to_string().cyan());
    println!("  Input:   {}", input.yellow());
    println!();

    match pattern.first_match(input) {
        Ok(Some(m)) => {
            let r = m.range();
            println!("{}", "✓ Match found!".green().bold());
            println!("  Position: {}..{}", r.start, r.end);
            println!("  Match:    {}", m.as_str().green());

            if verbose && m.len() > 1 {
                println!();
                print_groups(&m);
            }
        }
        Ok(None) => println!("{}", "✗ No match".red()),
        Err(e) => fail(e),
    }
}

fn cmd_find(pattern: &Pattern, input: &str) {
    let matches = pattern.matches(input).unwrap_or_else(|e| fail(e));
    info!("{} match(es) of {} in {} byte(s)", matches.len(), pattern, input.len());

    if matches.is_empty() {
        println!("{}", "No matches found".red());
    } else {
        println!(
            "{} {}",
            "Found".bold(),
            format!("{} match(es)", matches.len()).green()
        );
        println!();

        for (i, m) in matches.iter().enumerate() {
            let r = m.range();
            println!("  [{}] {}..{} = {}", i + 1, r.start, r.end, m.as_str().green());
        }
    }
}

fn cmd_match(pattern: &Pattern, input: &str) {
    if pattern.is_match(input).unwrap_or_else(|e| fail(e)) {
        println!("{}", "true".green());
        std::process::exit(0);
    } else {
        println!("{}", "false".red());
        std::process::exit(1);
    }
}

fn cmd_groups(pattern: &Pattern) {
    println!("{}", "Analyzing pattern...".bold());
    println!("  Pattern: {}", pattern.as_str().cyan());
    println!("  Options: {}", pattern.options().flag_string().yellow());
    println!(
        "  Engine groups:   {}",
        pattern.number_of_capture_groups()
    );
    println!("  Analyzed groups: {}", pattern.groups().len());
    println!();

    println!("{}", "Group tree:".bold());
    println!("  {}", pattern.groups());

    if !pattern.group_names().is_empty() {
        println!();
        println!("{}", "Names:".bold());
        for name in pattern.capture_group_names() {
            let indices = pattern.group_names().get(name).unwrap_or_default();
            let indices: Vec<String> = indices.iter().map(usize::to_string).collect();
            println!("  {} -> {}", name.cyan(), indices.join(", ").green());
        }
    }
}

fn cmd_replace(pattern: &Pattern, input: &str, template: &str) {
    let mut text = input.to_string();
    let count = pattern
        .replace_matches(&mut text, template)
        .unwrap_or_else(|e| fail(e));
    info!("replaced {} match(es) of {}", count, pattern);

    println!("{}", text);
    eprintln!(
        "{} {}",
        "Replaced".bold(),
        format!("{} match(es)", count).green()
    );
}

fn cmd_flags(flags: &str) {
    match flags.parse::<Options>() {
        Ok(options) => {
            debug!("flags {:?} decode to {:?}", flags, options);
            println!("{}", "Options:".bold());
            for option in options.iter() {
                if let Some(c) = regexlit::flag_char(option) {
                    println!("  {} {:?}", c.to_string().cyan(), option);
                }
            }
            println!();
            println!("  Canonical: {}", options.flag_string().green());
        }
        Err(e) => fail(e),
    }
}
