use crate::infra::{
    default_scoring_config, InMemoryAnalyticsSink, InMemoryLeadRepository,
    InMemoryNotificationPublisher,
};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use leadflow::error::AppError;
use leadflow::workflows::analytics::AnalyticsSink;
use leadflow::workflows::leads::{
    BudgetRange, LeadCsvImporter, LeadDeskService, LeadScore, LeadSubmission, ProjectTimeline,
    ScoringEngine, ServiceCategory,
};

#[derive(Args, Debug, Default)]
pub(crate) struct ScoreArgs {
    /// Budget band tag (e.g. over-100k, 25k-50k); unknown tags score zero
    #[arg(long)]
    pub(crate) budget: Option<String>,
    /// Timeline tag (asap, 1-month, 2-months, 3-months, flexible)
    #[arg(long)]
    pub(crate) timeline: Option<String>,
    /// Service vertical tag (law-firm, consulting, luxury, ...)
    #[arg(long)]
    pub(crate) service: Option<String>,
    /// Company name, if the prospect gave one
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Current website URL, if any
    #[arg(long)]
    pub(crate) website_url: Option<String>,
    /// Free-text project goals
    #[arg(long)]
    pub(crate) goals: Option<String>,
    /// Display name for the rendered breakdown
    #[arg(long, default_value = "Ad-hoc lead")]
    pub(crate) name: String,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// CSV lead export to qualify
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Maximum number of queue entries to print
    #[arg(long, default_value_t = 10)]
    pub(crate) queue_limit: usize,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Optional CSV lead export; falls back to built-in sample leads
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Maximum number of queue entries to print
    #[arg(long, default_value_t = 10)]
    pub(crate) queue_limit: usize,
}

type DemoService =
    LeadDeskService<InMemoryLeadRepository, InMemoryNotificationPublisher, InMemoryAnalyticsSink>;

fn build_demo_service() -> (
    Arc<DemoService>,
    Arc<InMemoryNotificationPublisher>,
    Arc<InMemoryAnalyticsSink>,
) {
    let repository = Arc::new(InMemoryLeadRepository::default());
    let notifier = Arc::new(InMemoryNotificationPublisher::default());
    let sink = Arc::new(InMemoryAnalyticsSink::default());
    let service = Arc::new(LeadDeskService::new(
        repository,
        notifier.clone(),
        sink.clone(),
        default_scoring_config(),
    ));
    (service, notifier, sink)
}

pub(crate) fn run_lead_score(args: ScoreArgs) -> Result<(), AppError> {
    let submission = LeadSubmission {
        name: args.name.clone(),
        email: "prospect@example.com".to_string(),
        budget_range: args
            .budget
            .as_deref()
            .map(BudgetRange::from_tag)
            .unwrap_or_default(),
        timeline: args
            .timeline
            .as_deref()
            .map(ProjectTimeline::from_tag)
            .unwrap_or_default(),
        service_type: args
            .service
            .as_deref()
            .map(ServiceCategory::from_tag)
            .unwrap_or_default(),
        company: args.company,
        website_url: args.website_url,
        goals: args.goals,
        ..LeadSubmission::default()
    };

    let engine = ScoringEngine::new(default_scoring_config());
    let score = engine.score_submission(&submission);
    render_score(&args.name, &score);
    Ok(())
}

pub(crate) fn run_lead_import(args: ImportArgs) -> Result<(), AppError> {
    let submissions = LeadCsvImporter::from_path(&args.csv)?;
    println!("Imported {} lead(s) from {}", submissions.len(), args.csv.display());

    let (service, notifier, _) = build_demo_service();
    qualify_and_render(&service, submissions);
    render_pipeline(&service, notifier.alerts().len(), args.queue_limit);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Lead desk demo");

    let submissions = match args.csv {
        Some(path) => {
            let imported = LeadCsvImporter::from_path(&path)?;
            println!("Data source: CSV export ({} lead(s))", imported.len());
            imported
        }
        None => {
            println!("Data source: built-in sample leads");
            sample_submissions()
        }
    };

    let (service, notifier, sink) = build_demo_service();
    qualify_and_render(&service, submissions);
    render_pipeline(&service, notifier.alerts().len(), args.queue_limit);

    let totals = sink.totals().unwrap_or_default();
    println!("\nAnalytics events");
    if totals.is_empty() {
        println!("- none recorded");
    }
    for count in totals {
        println!("- {}: {}", count.event_name, count.count);
    }

    Ok(())
}

fn qualify_and_render(service: &DemoService, submissions: Vec<LeadSubmission>) {
    for submission in submissions {
        let name = submission.name.clone();
        match service.submit(submission, Utc::now()) {
            Ok(record) => {
                if let Some(score) = &record.score {
                    println!();
                    render_score(&record.profile.name, score);
                }
            }
            Err(error) => {
                println!("\nSkipping '{name}': {error}");
            }
        }
    }
}

fn render_score(name: &str, score: &LeadScore) {
    println!("Lead: {name}");
    println!(
        "Score: {}/100 ({}), priority {}",
        score.total_score,
        score.category.label(),
        score.priority
    );
    println!("Factors:");
    for factor in &score.factors {
        println!(
            "- {}: {} pts at {}% weight | {}",
            factor.factor.label(),
            factor.raw_score,
            factor.weight,
            factor.rationale
        );
    }
    println!("Recommended actions:");
    for action in &score.recommendations {
        println!("- {action}");
    }
}

fn render_pipeline(service: &DemoService, alert_count: usize, queue_limit: usize) {
    match service.queue(Utc::now(), queue_limit) {
        Ok(queue) if queue.is_empty() => println!("\nFollow-up queue: empty"),
        Ok(queue) => {
            println!("\nFollow-up queue");
            for item in queue {
                println!(
                    "- {} | {} | score {} | {} | waiting {}h | {}",
                    item.lead_id.0,
                    item.name,
                    item.total_score
                        .map(|score| score.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    item.category.unwrap_or("unscored"),
                    item.hours_since_created,
                    item.next_action
                );
            }
        }
        Err(error) => println!("\nFollow-up queue unavailable: {error}"),
    }

    match service.report() {
        Ok(summary) => {
            println!("\nPipeline summary");
            println!(
                "- {} lead(s) total, {} open, {} converted ({:.1}% conversion)",
                summary.total_leads,
                summary.open_leads,
                summary.converted_leads,
                summary.conversion_rate
            );
            println!(
                "- {} hot / {} warm / {} cold, average score {:.1}",
                summary.hot_leads, summary.warm_leads, summary.cold_leads, summary.average_score
            );
            println!("- pipeline value {}", summary.pipeline_value);
        }
        Err(error) => println!("\nPipeline summary unavailable: {error}"),
    }

    println!("\nHot-lead alerts raised: {alert_count}");
}

fn sample_submissions() -> Vec<LeadSubmission> {
    vec![
        LeadSubmission {
            name: "Lerato Dlamini".to_string(),
            email: "lerato@artisanestates.co.za".to_string(),
            phone: Some("+27 82 555 0199".to_string()),
            company: Some("Artisan Estates".to_string()),
            service_type: ServiceCategory::Luxury,
            budget_range: BudgetRange::Over100k,
            timeline: ProjectTimeline::Asap,
            location: Some("sandton".to_string()),
            website_url: Some("https://artisanestates.co.za".to_string()),
            goals: Some("Relaunch the portfolio site before summer listings".to_string()),
            source: "website".to_string(),
            ..LeadSubmission::default()
        },
        LeadSubmission {
            name: "Johan Bester".to_string(),
            email: "johan@besterconsulting.co.za".to_string(),
            company: Some("Bester Consulting".to_string()),
            service_type: ServiceCategory::Consulting,
            budget_range: BudgetRange::From25kTo50k,
            timeline: ProjectTimeline::TwoMonths,
            location: Some("pretoria".to_string()),
            ..LeadSubmission::default()
        },
        LeadSubmission {
            name: "Walk-in Prospect".to_string(),
            email: "prospect@example.com".to_string(),
            ..LeadSubmission::default()
        },
    ]
}
