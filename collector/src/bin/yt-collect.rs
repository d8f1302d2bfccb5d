use clap::Parser;
use eyre::Context;
use std::io::{BufRead, IsTerminal, Write};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use yt_category_collector::collect::{CollectRequest, StopReason, collect};
use yt_category_collector::config::Config;
use yt_category_collector::key::load_api_key;
use yt_category_collector::output::{self, RecordSink};
use yt_category_collector::quota::{Endpoint, Quota};
use yt_category_collector::youtube_api::{YouTubeApi, YouTubeClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_ansi(std::io::stdout().is_terminal())
        .init();

    let config = Config::parse();
    config.validate().context("check configuration")?;
    let region = config.region();

    let key = load_api_key(&config.key_file).context("load YouTube API key")?;
    let http = reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .context("build HTTP client")?;
    let yt = YouTubeClient::new(key, http).with_base_url(&config.base_url);
    let mut quota = Quota::new(config.quota_ceiling);

    if !config.skip_languages {
        quota.charge(Endpoint::I18nLanguages);
        let languages = yt.i18n_languages().await.context("fetch i18n languages")?;
        let path = output::write_languages(&config.out_dir, &languages)
            .context("write language listing")?;
        tracing::info!(path = %path.display(), "retrieved {} languages", languages.len());
    }

    println!("Video categories for region code:{region}...");
    quota.charge(Endpoint::VideoCategories);
    let categories = yt
        .video_categories(&region, &config.language)
        .await
        .context("fetch video categories")?;
    output::write_categories(&config.out_dir, &region, &categories)
        .context("write category listing")?;
    for (id, title) in &categories {
        println!("{id}: {title}");
    }

    let category = match &config.category {
        Some(category) => category.trim().to_string(),
        None => prompt_category().context("read category choice")?,
    };
    if !category.is_empty() && !categories.contains_key(&category) {
        tracing::warn!(category = %category, region = %region, "category is not listed for this region");
    }

    let output_path = config.output_path();
    let mut sink = RecordSink::open(&output_path)
        .with_context(|| format!("open {}", output_path.display()))?;

    let summary = collect(
        &yt,
        CollectRequest {
            region: &region,
            category: &category,
        },
        &mut quota,
        &mut sink,
    )
    .await;

    println!("Videos collected {}", summary.records);
    println!("You have used {} of {} quota units", summary.quota_used, quota.ceiling());

    match summary.stop {
        StopReason::Aborted(e) => Err(eyre::Report::new(e).wrap_err("collection aborted")),
        StopReason::SearchRejected(message) => {
            Err(eyre::eyre!("YouTube API rejected the search: {message}"))
        }
        StopReason::Exhausted | StopReason::EmptyPage | StopReason::QuotaCeiling => Ok(()),
    }
}

fn prompt_category() -> eyre::Result<String> {
    print!(r#"Choose one of the above categories or press "Enter" to continue... "#);
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
