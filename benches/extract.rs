use criterion::{criterion_group, criterion_main, Criterion, black_box};

use voice_scrape::specs::audio_table;

/// A voice-line page roughly the size of a real character page.
fn sample_page(rows: usize) -> String {
    let mut doc = String::from("<html><body><table class=\"wikitable\">");
    for i in 0..rows {
        let variants = if i % 4 == 0 { 2 } else { 1 };
        let mut audio = String::new();
        for v in 0..variants {
            audio.push_str(&format!(
                r#"<span typeof="mw:File"><span class="mw-tmh-player audio"><audio controls>
<source src="//static.wiki.gg/images/a/ab/Line_{i}_{v}.ogg" type="audio/ogg"/>
<source src="//static.wiki.gg/images/transcoded/a/ab/Line_{i}_{v}.ogg/Line_{i}_{v}.ogg.mp3" type="audio/mpeg" data-transcodekey="mp3"/>
</audio></span></span>"#
            ));
        }
        doc.push_str(&format!(
            "<tr><td>Line {i}</td><td>{audio}</td><td><p>先生、これは{i}番目の台詞です。<br>Second line</p></td></tr>\n"
        ));
    }
    doc.push_str("</table></body></html>");
    doc
}

fn bench_extract(c: &mut Criterion) {
    let doc = sample_page(200);

    c.bench_function("audio_table_extract_200_rows", |b| {
        b.iter(|| {
            let ex = audio_table::extract(black_box(&doc), "data", None);
            black_box(ex.urls.len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
