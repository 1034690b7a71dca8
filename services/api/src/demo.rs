use crate::infra::{EnvLicenseValidator, InMemoryApplicationRepository, InMemoryDecisionNotifier};
use cardflow::config::AppConfig;
use cardflow::error::AppError;
use cardflow::workflows::intake::ApplicationCsvImporter;
use cardflow::workflows::screening::{
    CardApplicationService, CreditCardApplication, ScreeningEngine,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScreenArgs {
    /// CSV export of applications (`Age`, `Gross Annual Income`, `Frequent Flyer Number`)
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Obtain validity through the validator's out-parameter channel
    #[arg(long)]
    pub(crate) use_out_channel: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the batch screening portion of the demo output
    #[arg(long)]
    pub(crate) skip_batch: bool,
}

/// Screen a CSV export and print one decision per row.
pub(crate) fn run_screen(args: ScreenArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let applications = ApplicationCsvImporter::from_path(&args.csv)?;

    let validator = Arc::new(EnvLicenseValidator::from_env());
    let engine = ScreeningEngine::new(validator, config.screening);

    println!("Screening {} application(s)", applications.len());
    for (index, application) in applications.iter().enumerate() {
        let decision = if args.use_out_channel {
            engine.evaluate_using_out(application)
        } else {
            engine.evaluate(application)
        };
        println!(
            "- row {}: age {}, income {}, flyer {} -> {}",
            index + 1,
            application.age,
            application.gross_annual_income,
            application.frequent_flyer_number.as_deref().unwrap_or("-"),
            decision.label()
        );
    }

    Ok(())
}

/// Walk the full intake-to-decision workflow against in-memory infrastructure.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;

    let repository = Arc::new(InMemoryApplicationRepository::default());
    let notifier = Arc::new(InMemoryDecisionNotifier::default());
    let validator = Arc::new(EnvLicenseValidator::from_env());
    let service = CardApplicationService::new(
        repository,
        notifier.clone(),
        validator,
        config.screening.clone(),
    );

    let samples = [
        (
            "high income",
            CreditCardApplication {
                age: 35,
                gross_annual_income: 150_000,
                frequent_flyer_number: Some("ff-901".to_string()),
            },
        ),
        (
            "young applicant",
            CreditCardApplication {
                age: 19,
                gross_annual_income: 45_000,
                frequent_flyer_number: Some("ff-2".to_string()),
            },
        ),
        (
            "low income",
            CreditCardApplication {
                age: 42,
                gross_annual_income: 19_999,
                frequent_flyer_number: Some("x".to_string()),
            },
        ),
        (
            "no flyer number",
            CreditCardApplication {
                age: 42,
                gross_annual_income: 45_000,
                frequent_flyer_number: None,
            },
        ),
    ];

    println!("Card application screening demo");
    for (label, application) in samples {
        let record = service.submit(application)?;
        let outcome = service.evaluate(&record.application_id)?;
        println!(
            "- {} ({}): {}",
            record.application_id.0,
            label,
            outcome.decision.summary()
        );
    }

    let alerts = notifier.events();
    if alerts.is_empty() {
        println!("\nDecision alerts: none");
    } else {
        println!("\nDecision alerts");
        for alert in alerts {
            println!("- [{}] {}", alert.template, alert.application_id.0);
        }
    }

    if !args.skip_batch {
        let export = "\
Age,Gross Annual Income,Frequent Flyer Number
35,120000,ff-901
42,\"19,999\",x
19,45000,ff-2
";
        let applications = ApplicationCsvImporter::from_reader(export.as_bytes())?;
        let engine = ScreeningEngine::new(
            Arc::new(EnvLicenseValidator::from_env()),
            config.screening,
        );

        println!("\nBatch screening sample export");
        for (index, application) in applications.iter().enumerate() {
            println!(
                "- row {}: {}",
                index + 1,
                engine.evaluate(application).label()
            );
        }
    }

    Ok(())
}
