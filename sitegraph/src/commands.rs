use crate::CLAP_STYLING;
use clap::{arg, command};

fn input_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        arg!(--"vertices" <PATH>)
            .required(true)
            .help("Whitespace-separated 'id domain' lines, one website per line"),
    )
    .arg(
        arg!(--"edges" <PATH>)
            .required(true)
            .help("Whitespace-separated 'source_id destination_id' lines, one link per line"),
    )
    .arg(
        arg!(--"stats" <PATH>)
            .required(true)
            .help(
                "CSV with a header row: alexa_rank,domain,daily_min,daily_pageviews,\
            traffic_ratio,site_links,tranco_rank",
            ),
    )
    .arg(
        arg!(-n --"max-vertices" <NUM>)
            .required(false)
            .help("Maximum number of websites to load, in ascending id order")
            .value_parser(clap::value_parser!(usize))
            .default_value("10000"),
    )
    .arg(
        arg!(-x --"exclude" <DOMAIN>)
            .required(false)
            .help("Never load this domain or its links (repeatable)")
            .action(clap::ArgAction::Append),
    )
}

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitegraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitegraph")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and progress output")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" "Show debug logging on stderr")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            input_args(
                command!("analyze")
                    .about("Load a web graph, compute engagement statistics and report on them"),
            )
            .arg(
                arg!(--"structural")
                    .required(false)
                    .help("Also load degree and neighbour popularity statistics")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                arg!(--"link-analytics")
                    .required(false)
                    .help("Also load PageRank and harmonic centrality")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                arg!(-t --"top" <NUM>)
                    .required(false)
                    .help("Number of websites listed in the report")
                    .value_parser(clap::value_parser!(usize))
                    .default_value("10"),
            )
            .arg(
                arg!(-o --"output" <PATH>)
                    .required(false)
                    .help("Save report to file (default: display to screen)"),
            )
            .arg(
                arg!(-f --"format" <FORMAT>)
                    .required(false)
                    .help("Report format: text, json")
                    .value_parser(["text", "json"])
                    .default_value("text"),
            ),
        )
        .subcommand(
            input_args(
                command!("path")
                    .about("Find a hyperlink path between two websites")
                    .after_help(
                        "Without --max-depth the search may try every simple path before it \
                    reports that none exists. On large graphs this can run for a very long \
                    time; pass --max-depth to bound the search.",
                    ),
            )
            .arg(arg!(<FROM>).help("Domain the path starts from"))
            .arg(arg!(<TO>).help("Domain the path leads to"))
            .arg(
                arg!(--"stats-only")
                    .required(false)
                    .help("Skip websites that have no traffic statistics")
                    .action(clap::ArgAction::SetTrue),
            )
            .arg(
                arg!(--"undirected")
                    .required(false)
                    .help("Follow links in either direction")
                    .action(clap::ArgAction::SetTrue)
                    .conflicts_with_all(["strong", "max-depth"]),
            )
            .arg(
                arg!(--"strong")
                    .required(false)
                    .help("Search both directions and report whether the websites are strongly connected")
                    .action(clap::ArgAction::SetTrue)
                    .conflicts_with("max-depth"),
            )
            .arg(
                arg!(-d --"max-depth" <NUM>)
                    .required(false)
                    .help("Only report whether TO is reachable over at most NUM links")
                    .value_parser(clap::value_parser!(usize)),
            ),
        )
}
