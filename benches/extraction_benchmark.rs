//! Extraction cost per storefront page
//!
//! Script evaluation builds a fresh JavaScript context per call, so the band
//! data read dominates a page reconcile. These benches keep an eye on both.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

use bandcamp_scraper_lib::application::reconcile_page;
use bandcamp_scraper_lib::infrastructure::PageSelectors;
use bandcamp_scraper_lib::infrastructure::parsing::{SandboxGlobals, sandbox};

fn synthetic_storefront(album_count: usize) -> String {
    let albums: Vec<_> = (0..album_count)
        .map(|n| {
            json!({
                "id": n + 1,
                "art_id": 1_000_000 + n,
                "page_url": format!("/album/release-{n}"),
                "title": format!("Release {n}"),
            })
        })
        .collect();
    let page_data = json!({ "buyfulldisco": { "tralbums": [] } });

    format!(
        r#"<html><head>
            <meta property="og:description" content="Benchmark band">
            <script>
                $(document).ready(function () {{}});
                var BandData = {{ id: 1, name: "Bench" }};
            </script>
        </head><body>
            <div id="pagedata" data-blob='{page_data}'></div>
            <ol class="music-grid" data-initial-values='{albums}'>
                <li><a href="/album/release-0"><img src="https://f4.bcbits.com/img/a1000000_2.jpg"></a></li>
            </ol>
        </body></html>"#,
        albums = serde_json::Value::from(albums)
    )
}

fn reconcile_benchmark(c: &mut Criterion) {
    let selectors = PageSelectors::default();
    let mut group = c.benchmark_group("reconcile_page");

    for album_count in [10, 100, 500] {
        let html = synthetic_storefront(album_count);
        group.bench_with_input(BenchmarkId::from_parameter(album_count), &html, |b, html| {
            b.iter(|| reconcile_page(black_box(html), "https://bench.bandcamp.com", &selectors));
        });
    }

    group.finish();
}

fn sandbox_benchmark(c: &mut Criterion) {
    let globals = SandboxGlobals::framework_mocks();
    let script = r#"
        Control.registerController("band", function () {});
        var BandData = { id: 1, name: "Bench", links: [1, 2, 3] };
    "#;

    c.bench_function("sandbox_evaluate_band_data", |b| {
        b.iter(|| sandbox::evaluate(black_box(script), &globals));
    });
}

criterion_group!(benches, reconcile_benchmark, sandbox_benchmark);
criterion_main!(benches);
