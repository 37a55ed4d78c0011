use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use tvdetect::conllu;
use tvdetect::{ConllTvDetector, Lexicon, TokenTvDetector};

const SENTENCES: &[&str] = &[
    "Я вижу тебя каждый день , но ты меня не замечаешь .",
    "Скажите , пожалуйста , где ваш номер ?",
    "Поезд отправляется в девять часов утра .",
    "Твоя сестра звонила вчера вечером .",
];

const ANNOTATED: &str = "1\tСкажите\tсказать\tVERB\t_\tMood=Imp|Number=Plur|Person=2\t0\troot\t_\t_\n\
2\t,\t,\tPUNCT\t_\t_\t1\tpunct\t_\t_\n\
3\tгде\tгде\tADV\t_\t_\t5\tadvmod\t_\t_\n\
4\tваш\tваш\tDET\t_\tCase=Nom|Gender=Masc|Number=Sing\t5\tdet\t_\t_\n\
5\tномер\tномер\tNOUN\t_\tCase=Nom|Gender=Masc|Number=Sing\t1\tobj\t_\t_\n\
\n";

fn bench_token_detector(c: &mut Criterion) {
    let detector = TokenTvDetector::new();
    let mut group = c.benchmark_group("token_detector");
    group.throughput(Throughput::Elements(SENTENCES.len() as u64));
    group.bench_function("classify", |b| {
        b.iter(|| {
            for sentence in SENTENCES {
                black_box(detector.classify(black_box(sentence)));
            }
        })
    });
    group.finish();

    c.bench_function("lexicon_construction", |b| b.iter(|| black_box(Lexicon::russian())));
}

fn bench_conll_detector(c: &mut Criterion) {
    let detector = ConllTvDetector::new();
    let corpus = ANNOTATED.repeat(100);

    let mut group = c.benchmark_group("conll_detector");
    group.throughput(Throughput::Bytes(corpus.len() as u64));
    group.bench_function("parse_and_classify", |b| {
        b.iter(|| {
            for sentence in conllu::parse_incr(black_box(corpus.as_bytes())).flatten() {
                black_box(detector.classify_sentence(&sentence));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_token_detector, bench_conll_detector);
criterion_main!(benches);
