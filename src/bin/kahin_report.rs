use clap::Parser;
use kahin_bot::config::cli::ReportArgs;
use kahin_bot::config::ContentConfig;
use kahin_bot::core::report::{build_report, write_report};
use kahin_bot::domain::model::Birthdate;
use kahin_bot::utils::logger;
use kahin_bot::LocalContentStore;
use std::io::{BufRead, Write};

fn prompt_birthdate() -> anyhow::Result<String> {
    print!("Please input a birthdate in the DAY.MONTH.YEAR format (e.g. 22.12.2002, 31.07.2002): ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn main() -> anyhow::Result<()> {
    let mut args = ReportArgs::parse();
    logger::init_cli_logger(args.verbose);

    if args.birthdates.is_empty() {
        args.birthdates.push(prompt_birthdate()?);
    }

    // Parse everything first so a typo does not leave half the reports written.
    let birthdates = args
        .birthdates
        .iter()
        .map(|raw| {
            Birthdate::parse(raw).map_err(|e| {
                anyhow::anyhow!(
                    "Given birthdate ({}) is not in the required format (DAY.MONTH.YEAR): {}",
                    raw,
                    e
                )
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let store = LocalContentStore::new(ContentConfig::with_data_dir(&args.data_dir));

    for birthdate in birthdates {
        let report = build_report(&store, birthdate, args.method)?;
        println!("{}", report.headline);

        let path = write_report(&args.reports_dir, &report)?;
        tracing::info!("Report written to {}", path.display());
        println!(
            "Report for the birthdate {} has been generated and written to file {}",
            birthdate.report_stem(),
            path.display()
        );
    }

    Ok(())
}
