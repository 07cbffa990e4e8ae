extern crate anyhow;

use indic_pos::pipelines::common::{Strategy, TagPair};
use indic_pos::pipelines::dictionary_tagging::{CorpusConfig, DictionaryTagger};
use indic_pos::pipelines::fallback_tagging::FallbackTagger;
use indic_pos::pipelines::language_detection::{
    DetectedLanguage, FixedLanguageDetector, LanguageDetector,
};
use indic_pos::pipelines::pos_tagging::POSTaggingPipeline;
use indic_pos::pipelines::strategy::{
    FailureReason, FallbackReason, StrategyOutcome, StrategySelector,
};
use indic_pos::TaggerError;
use std::cell::RefCell;
use std::rc::Rc;

/// Records every call made to the collaborators of a pipeline
#[derive(Default)]
struct CallLog {
    detector: usize,
    dictionary: Vec<&'static str>,
    fallback: usize,
}

type SharedLog = Rc<RefCell<CallLog>>;

struct StubDetector {
    code: &'static str,
    log: SharedLog,
}

impl LanguageDetector for StubDetector {
    fn detect(&self, _text: &str) -> Option<DetectedLanguage> {
        self.log.borrow_mut().detector += 1;
        Some(DetectedLanguage::new(self.code, 0.99))
    }
}

enum DictionaryBehaviour {
    Split(&'static str),
    Empty,
    Error,
}

struct StubDictionary {
    behaviour: DictionaryBehaviour,
    log: SharedLog,
}

impl DictionaryTagger for StubDictionary {
    fn tag(&self, text: &str, corpus: &CorpusConfig) -> Result<Vec<TagPair>, TaggerError> {
        self.log.borrow_mut().dictionary.push(corpus.file_name);
        match self.behaviour {
            DictionaryBehaviour::Split(tag) => Ok(text
                .split_whitespace()
                .map(|token| TagPair::new(token, tag))
                .collect()),
            DictionaryBehaviour::Empty => Ok(vec![]),
            DictionaryBehaviour::Error => Err(TaggerError::CorpusError(format!(
                "{} not found",
                corpus.file_name
            ))),
        }
    }
}

struct StubFallback {
    empty: bool,
    log: SharedLog,
}

impl FallbackTagger for StubFallback {
    fn tag(&self, text: &str) -> Vec<TagPair> {
        self.log.borrow_mut().fallback += 1;
        if self.empty {
            return vec![];
        }
        text.split_whitespace()
            .map(|token| TagPair::new(token, "MISC"))
            .collect()
    }
}

fn pipeline(
    code: &'static str,
    behaviour: DictionaryBehaviour,
    empty_fallback: bool,
) -> (POSTaggingPipeline, SharedLog) {
    let log = SharedLog::default();
    let pipeline = POSTaggingPipeline::from_parts(
        StubDetector {
            code,
            log: log.clone(),
        },
        StubDictionary {
            behaviour,
            log: log.clone(),
        },
        StubFallback {
            empty: empty_fallback,
            log: log.clone(),
        },
    );
    (pipeline, log)
}

#[test]
fn hindi_sentence_uses_dictionary() -> anyhow::Result<()> {
    let (pipeline, log) = pipeline("hi", DictionaryBehaviour::Split("NN"), false);

    let response = pipeline.tag("मैं स्कूल जा रहा हूँ।");

    assert_eq!(response.language.as_ref().map(|l| l.code.as_str()), Some("hi"));
    assert_eq!(response.outcome.strategy(), Some(Strategy::Dictionary));
    let tokens = response
        .outcome
        .tags()
        .unwrap()
        .iter()
        .map(|pair| pair.token.as_str())
        .collect::<Vec<_>>();
    assert_eq!(tokens, ["मैं", "स्कूल", "जा", "रहा", "हूँ।"]);
    assert_eq!(log.borrow().dictionary, ["hindi.pos"]);
    assert_eq!(log.borrow().fallback, 0);
    Ok(())
}

#[test]
fn supported_languages_use_their_corpus() {
    for (code, corpus) in [
        ("hi", "hindi.pos"),
        ("mr", "marathi.pos"),
        ("gu", "gujarati.pos"),
    ] {
        let (pipeline, log) = pipeline(code, DictionaryBehaviour::Split("NN"), false);
        let response = pipeline.tag("एक दो");
        assert_eq!(response.outcome.strategy(), Some(Strategy::Dictionary));
        assert_eq!(log.borrow().dictionary, [corpus]);
    }
}

#[test]
fn unsupported_languages_never_reach_dictionary() {
    for code in ["ta", "te", "bn", "en", "und"] {
        let (pipeline, log) = pipeline(code, DictionaryBehaviour::Split("NN"), false);
        let response = pipeline.tag("நான் பள்ளிக்கு போகிறேன்");
        match &response.outcome {
            StrategyOutcome::Success(tagged) => {
                assert_eq!(tagged.strategy, Strategy::Fallback);
                assert_eq!(
                    tagged.fallback_reason,
                    Some(FallbackReason::UnsupportedLanguage)
                );
            }
            StrategyOutcome::Failure { .. } => panic!("unexpected failure for {code}"),
        }
        assert!(log.borrow().dictionary.is_empty());
        assert_eq!(log.borrow().fallback, 1);
    }
}

#[test]
fn dictionary_error_returns_exact_fallback_output() {
    let (pipeline, log) = pipeline("gu", DictionaryBehaviour::Error, false);
    let text = "હું શાળાએ જાઉં છું";

    let response = pipeline.tag(text);

    let expected_log = SharedLog::default();
    let expected = StubFallback {
        empty: false,
        log: expected_log,
    }
    .tag(text);
    match response.outcome {
        StrategyOutcome::Success(tagged) => {
            assert_eq!(tagged.strategy, Strategy::Fallback);
            assert_eq!(tagged.tags, expected);
            assert!(matches!(
                tagged.fallback_reason,
                Some(FallbackReason::DictionaryFailed(ref message)) if message.contains("gujarati.pos")
            ));
        }
        StrategyOutcome::Failure { .. } => panic!("dictionary errors must not fail the request"),
    }
    assert_eq!(log.borrow().dictionary.len(), 1);
    assert_eq!(log.borrow().fallback, 1);
}

#[test]
fn empty_dictionary_result_falls_back_once() {
    let (pipeline, log) = pipeline("mr", DictionaryBehaviour::Empty, false);
    let response = pipeline.tag("मी शाळेत जातो");
    assert_eq!(response.outcome.strategy(), Some(Strategy::Fallback));
    assert_eq!(log.borrow().dictionary.len(), 1);
    assert_eq!(log.borrow().fallback, 1);
}

#[test]
fn empty_fallback_after_dictionary_failure_is_an_empty_success() {
    let (pipeline, _) = pipeline("hi", DictionaryBehaviour::Error, true);
    let response = pipeline.tag("मैं स्कूल जा रहा हूँ।");
    match response.outcome {
        StrategyOutcome::Success(tagged) => {
            assert_eq!(tagged.strategy, Strategy::Fallback);
            assert!(tagged.tags.is_empty());
        }
        StrategyOutcome::Failure { .. } => panic!("expected an empty success"),
    }
}

#[test]
fn empty_fallback_for_unsupported_language_is_total_failure() {
    let (pipeline, _) = pipeline("ta", DictionaryBehaviour::Split("NN"), true);
    let response = pipeline.tag("நான் பள்ளிக்கு போகிறேன்");
    assert_eq!(response.language.unwrap().code, "ta");
    assert_eq!(
        response.outcome,
        StrategyOutcome::failure(FailureReason::TotalFailure)
    );
}

#[test]
fn blank_input_reaches_no_collaborator() {
    for text in ["", "   ", "\t\n"] {
        let (pipeline, log) = pipeline("hi", DictionaryBehaviour::Split("NN"), false);
        let response = pipeline.tag(text);
        assert!(response.language.is_none());
        assert_eq!(
            response.outcome,
            StrategyOutcome::failure(FailureReason::InvalidInput)
        );
        let log = log.borrow();
        assert_eq!(log.detector, 0);
        assert!(log.dictionary.is_empty());
        assert_eq!(log.fallback, 0);
    }
}

#[test]
fn tagging_is_idempotent() {
    let (pipeline, _) = pipeline("hi", DictionaryBehaviour::Split("NN"), false);
    let first = pipeline.tag("वह घर जा रहा है");
    let second = pipeline.tag("वह घर जा रहा है");
    assert_eq!(first, second);
}

#[test]
fn forced_language_overrides_detection() {
    let (pipeline, log) = pipeline("ta", DictionaryBehaviour::Split("NN"), false);
    let pipeline = pipeline.with_detector(FixedLanguageDetector::new("hi"));
    let response = pipeline.tag("मैं स्कूल जा रहा हूँ।");
    assert_eq!(response.outcome.strategy(), Some(Strategy::Dictionary));
    assert_eq!(log.borrow().detector, 0);
}

#[test]
fn selector_never_fails_on_unknown_codes() {
    let log = SharedLog::default();
    let dictionary = StubDictionary {
        behaviour: DictionaryBehaviour::Error,
        log: log.clone(),
    };
    let fallback = StubFallback {
        empty: true,
        log: log.clone(),
    };
    let selector = StrategySelector::new(&dictionary, &fallback);
    for code in ["", "xx", "hin", "Hi"] {
        let tagged = selector.select("text", code);
        assert_eq!(tagged.strategy, Strategy::Fallback);
        assert!(tagged.tags.is_empty());
    }
    assert!(log.borrow().dictionary.is_empty());
}
