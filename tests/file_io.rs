mod common;

use std::io::Write;
use std::sync::Arc;

use singular_they::io::parse_m2;
use singular_they::{
    execute_stage3_pairs, execute_stage3_sentences, read_jsonl, read_m2, run_batch, AnnotatedSentence,
    Augmentor, AugmentorConfig, BatchConfig, Outcome, PairInput, PrecomputedAnnotator, SentenceInput,
    Stage3Config,
};

use common::{clock_was_striking, linguist};

const CORPUS: &str = "S She 's an linguist .
A 2 3|||R:DET|||a|||REQUIRED|||-NONE-|||0

S It 's a linguist .
A 0 2|||R:OTHER|||She is|||REQUIRED|||-NONE-|||0

S The clock striking as she stepped out into the street .
A 2 2|||M:VERB|||was|||REQUIRED|||-NONE-|||0
";

fn write_parses(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("parses.jsonl");
    let mut file = std::fs::File::create(&path).unwrap();
    for sentence in [
        linguist("She", "is"),
        linguist("She", "'s"),
        clock_was_striking(),
    ] {
        let line = serde_json::to_string(&AnnotatedSentence::from(&sentence)).unwrap();
        writeln!(file, "{}", line).unwrap();
    }
    path
}

fn augmentor(dir: &std::path::Path) -> Arc<Augmentor> {
    let annotator = PrecomputedAnnotator::from_jsonl(&write_parses(dir)).unwrap();
    assert_eq!(annotator.len(), 3);
    Arc::new(Augmentor::new(Arc::new(annotator), AugmentorConfig::default()))
}

#[tokio::test]
async fn test_m2_corpus_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let corpus = dir.path().join("corpus.m2");
    std::fs::write(&corpus, CORPUS).unwrap();
    let augmentor = augmentor(dir.path());

    let inputs = read_m2(&corpus).unwrap();
    assert_eq!(inputs.len(), 3);
    assert_eq!(inputs[1].input.target, "She is a linguist .");

    let job = {
        let augmentor = Arc::clone(&augmentor);
        move |input: &PairInput| {
            Outcome::from(augmentor.augment_pair(&input.source, &input.target, input.edits.as_deref()))
        }
    };
    let config = BatchConfig {
        workers: 2,
        ..Default::default()
    };
    let (records, summary) = run_batch(inputs, &config, job).await.unwrap();

    assert_eq!(summary.augmented, 1);
    assert_eq!(summary.not_augmented, 2);
    assert_eq!(summary.reasons.get("edit_conflict"), Some(&1));
    assert_eq!(summary.reasons.get("no_eligible_chain"), Some(&1));

    let stage3_config = Stage3Config {
        output: Some(dir.path().join("out.jsonl")),
        m2_output: Some(dir.path().join("out.m2")),
        report: Some(dir.path().join("report.txt")),
    };
    let result = execute_stage3_pairs(&records, &stage3_config).unwrap();

    let m2 = std::fs::read_to_string(result.m2_path.unwrap()).unwrap();
    assert_eq!(
        m2,
        "S They 're an linguist .\nA 2 3|||R:DET|||a|||REQUIRED|||-NONE-|||0\n\n"
    );
    let augmented = parse_m2(&m2).unwrap();
    assert_eq!(augmented[0].input.target, "They 're a linguist .");

    let report = std::fs::read_to_string(result.report_path.unwrap()).unwrap();
    assert!(report.starts_with("Singular `they` augmentation for GEC:\n"));
    assert!(report.contains("1\tSource: She 's an linguist .\n"));
    assert!(report.contains("\tAligned: She 's {an=>a} linguist .\n"));
    assert!(report.contains("\tAugmented Swapped: They 're an linguist .\n"));
    assert!(report.contains("\tAugmented Target: They 're a linguist .\n"));
    assert!(report.contains("2\tNo augment produced!\n"));
    assert!(report.contains("\tAligned: The clock {=>was} striking as she stepped out into the street .\n"));

    let output = std::fs::read_to_string(result.output_path.unwrap()).unwrap();
    let statuses: Vec<String> = output
        .lines()
        .map(|line| {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            value["status"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(statuses, vec!["augmented", "not_augmented", "not_augmented"]);
}

#[tokio::test]
async fn test_sentence_jsonl_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("sentences.jsonl");
    std::fs::write(
        &input_path,
        concat!(
            "{\"id\": \"s1\", \"text\": \"She is a linguist .\"}\n",
            "\n",
            "{\"text\": \"Nobody parsed this .\"}\n",
        ),
    )
    .unwrap();
    let augmentor = augmentor(dir.path());

    let inputs = read_jsonl::<SentenceInput>(&input_path).unwrap();
    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs[0].id, "s1");
    assert!(uuid::Uuid::parse_str(&inputs[1].id).is_ok());

    let job = {
        let augmentor = Arc::clone(&augmentor);
        move |input: &SentenceInput| Outcome::from(augmentor.augment_sentence(&input.text))
    };
    let (records, summary) = run_batch(inputs, &BatchConfig::default(), job).await.unwrap();

    assert_eq!(summary.augmented, 1);
    assert_eq!(summary.invalid, 1);

    let stage3_config = Stage3Config {
        output: None,
        m2_output: None,
        report: Some(dir.path().join("report.txt")),
    };
    let result = execute_stage3_sentences(&records, &stage3_config).unwrap();

    let report = std::fs::read_to_string(result.report_path.unwrap()).unwrap();
    assert!(report.contains("1:\tOriginal: She is a linguist .\n\tAugmented: They are a linguist .\n"));
    assert!(report.contains("2:\tOriginal: Nobody parsed this .\n\tInvalid input: "));
}
