//! Extraction and storage throughput
//!
//! - One listing page with many containers through the shared extractor
//! - A card grid through URL discovery
//! - Writing and reading back a table of records

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scraper::Html;

use job_harvest_lib::domain::services::RecordExtractor;
use job_harvest_lib::infrastructure::parquet_store::ParquetJobStore;
use job_harvest_lib::infrastructure::parsing::{
    ContextualParser, JobCardParser, JobListingParser, ListingPageContext,
};

fn listing_page(containers: usize) -> String {
    let mut html = String::from("<html><body>");
    for i in 0..containers {
        html.push_str(&format!(
            r#"<div class="box">
                 <h1 class="title">Engineer {i}</h1>
                 <h2 class="company">Company {i}</h2>
                 <div class="content">
                   <p>Design and build systems.</p>
                   <p>Work with a small team.</p>
                   <p id="location"><strong>Location:</strong> City {i}</p>
                   <p id="date"><strong>Posted:</strong> 2021-04-08</p>
                 </div>
               </div>"#
        ));
    }
    html.push_str("</body></html>");
    html
}

fn card_grid(cards: usize) -> String {
    (0..cards)
        .map(|i| {
            format!(
                r#"<div class="card"><a class="card-footer-item" href="https://example.com/learn">Learn</a>
                   <a class="card-footer-item" href="jobs/job-{i}.html">Apply</a></div>"#
            )
        })
        .collect()
}

fn bench_extraction(c: &mut Criterion) {
    let parser = JobListingParser::new().unwrap();
    let mut group = c.benchmark_group("extract_records");

    for containers in [1, 10, 100] {
        let html = listing_page(containers);
        group.bench_with_input(BenchmarkId::from_parameter(containers), &html, |b, html| {
            b.iter(|| parser.extract_records(black_box(html), "bench.html"));
        });
    }
    group.finish();
}

fn bench_url_discovery(c: &mut Criterion) {
    let parser = JobCardParser::new().unwrap();
    let document = Html::parse_document(&card_grid(100));
    let context = ListingPageContext::new("https://jobs.example.com/fake-jobs/");

    c.bench_function("discover_job_urls_100_cards", |b| {
        b.iter(|| parser.parse_with_context(black_box(&document), &context).unwrap());
    });
}

fn bench_storage(c: &mut Criterion) {
    let parser = JobListingParser::new().unwrap();
    let records = parser.extract_records(&listing_page(1_000), "bench.html");
    let dir = tempfile::tempdir().unwrap();
    let store = ParquetJobStore::new(dir.path().join("bench.parquet"));

    c.bench_function("save_1000_records", |b| {
        b.iter(|| store.write_records(black_box(&records)).unwrap());
    });

    store.write_records(&records).unwrap();
    c.bench_function("load_1000_records", |b| {
        b.iter(|| store.read_records().unwrap());
    });
}

criterion_group!(benches, bench_extraction, bench_url_discovery, bench_storage);
criterion_main!(benches);
