use crate::builder::{DefinitionChoice, TermChoice, TrueFalse};
use crate::config::Preferences;
use crate::error::QuizError;
use crate::traits::*;
use log::{info, warn};
use rand::RngCore;

/*
    Flow of a session;
        Collect preferences (happens before run).
        Definition block, term block, true/false block; each asks up to its count of questions
        and stops early once its builder can't produce another one.
        Report the score.
*/

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Phase {
    CollectingPreferences,
    RunningDefinitionBlock,
    RunningTermBlock,
    RunningTrueFalseBlock,
    Reporting,
    Done,
}

/// Mutable state of a single quiz.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub score: usize,
    pub total_answered: usize,
    pub used: UsedSet,
}

/// Qualitative remark on a percentage.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Band {
    Excellent,
    Great,
    Good,
    Passed,
    KeepPracticing,
}

impl Band {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Band::Excellent
        } else if percentage >= 80.0 {
            Band::Great
        } else if percentage >= 70.0 {
            Band::Good
        } else if percentage >= 60.0 {
            Band::Passed
        } else {
            Band::KeepPracticing
        }
    }

    pub fn message(&self) -> &'static str {
        match *self {
            Band::Excellent => "Excellent work! 🎉",
            Band::Great => "Great job! 👍",
            Band::Good => "Good work! 👏",
            Band::Passed => "You passed! ✅",
            Band::KeepPracticing => "Keep practicing! 📚",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Report {
    pub score: usize,
    pub total_answered: usize,
}

impl Report {
    /// Zero when nothing was answered.
    pub fn percentage(&self) -> f64 {
        if self.total_answered == 0 {
            return 0.0;
        }
        (self.score as f64 / self.total_answered as f64) * 100.0
    }

    pub fn band(&self) -> Band {
        Band::from_percentage(self.percentage())
    }
}

/// Runs the question blocks of one quiz over a pool.
#[derive(Debug)]
pub struct Session<'a> {
    pool: &'a [Record],
    state: SessionState,
    phase: Phase,
}

impl<'a> Session<'a> {
    /// A new session sits in CollectingPreferences; the preferences themselves are gathered by
    /// the caller and handed to `run`, which moves through the blocks.
    pub fn new(pool: &'a [Record]) -> Self {
        Session {
            pool,
            state: Default::default(),
            phase: Phase::CollectingPreferences,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run all blocks to completion and report the score.
    pub fn run(
        &mut self,
        preferences: &Preferences,
        rng: &mut dyn RngCore,
        responder: &mut dyn Responder,
    ) -> Result<Report, QuizError> {
        responder.notify(&SessionEvent::Started {
            total_questions: preferences.total_questions(),
        })?;

        let blocks: [(Phase, Box<dyn QuestionBuilder>, usize); 3] = [
            (
                Phase::RunningDefinitionBlock,
                Box::new(DefinitionChoice {
                    choices: preferences.definition_choices(),
                }),
                preferences.definition_questions(),
            ),
            (
                Phase::RunningTermBlock,
                Box::new(TermChoice {
                    choices: preferences.term_choices(),
                }),
                preferences.term_questions(),
            ),
            (
                Phase::RunningTrueFalseBlock,
                Box::new(TrueFalse),
                preferences.true_false_questions(),
            ),
        ];

        for (phase, builder, count) in blocks.iter() {
            self.phase = *phase;
            self.run_block(&**builder, *count, rng, responder)?;
        }

        self.phase = Phase::Reporting;
        let report = Report {
            score: self.state.score,
            total_answered: self.state.total_answered,
        };
        info!(
            "session finished: {}/{} ({:.1}%)",
            report.score,
            report.total_answered,
            report.percentage()
        );
        responder.notify(&SessionEvent::Finished(report))?;
        self.phase = Phase::Done;
        Ok(report)
    }

    fn run_block(
        &mut self,
        builder: &dyn QuestionBuilder,
        count: usize,
        rng: &mut dyn RngCore,
        responder: &mut dyn Responder,
    ) -> Result<(), QuizError> {
        for _ in 0..count {
            let question = match builder.build(self.pool, &mut self.state.used, rng) {
                Some(q) => q,
                None => {
                    warn!(
                        "ran out of records for {} questions",
                        builder.kind().describe()
                    );
                    responder.notify(&SessionEvent::BlockTruncated(builder.kind()))?;
                    break;
                }
            };

            let answer = responder.ask(self.state.total_answered + 1, &question)?;
            let correct = question.is_correct(answer);
            if correct {
                self.state.score += 1;
            }
            self.state.total_answered += 1;
            responder.notify(&SessionEvent::Answered {
                correct,
                expected: question.correct_label,
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::tests::network_pool;
    use crate::config::RawPreferences;
    use rand::SeedableRng;

    /// Answers from a fixed strategy and remembers everything it saw.
    #[derive(Default)]
    struct ScriptedResponder {
        always_correct: bool,
        questions: Vec<(usize, Question)>,
        events: Vec<SessionEvent>,
    }

    impl Responder for ScriptedResponder {
        fn ask(&mut self, number: usize, question: &Question) -> Result<Label, QuizError> {
            self.questions.push((number, question.clone()));
            if self.always_correct {
                Ok(question.correct_label)
            } else if question.correct_label == Label(1) {
                Ok(Label(2))
            } else {
                Ok(Label(1))
            }
        }

        fn notify(&mut self, event: &SessionEvent) -> Result<(), QuizError> {
            self.events.push(event.clone());
            Ok(())
        }
    }

    fn pool_of(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| Record::new(&format!("term{i}"), &format!("definition{i}")))
            .collect()
    }

    fn prefs(
        def: usize,
        def_c: usize,
        term: usize,
        term_c: usize,
        tf: usize,
        pool: usize,
    ) -> Preferences {
        Preferences::new(
            RawPreferences {
                definition_questions: def,
                definition_choices: def_c,
                term_questions: term,
                term_choices: term_c,
                true_false_questions: tf,
            },
            pool,
        )
        .expect("valid preferences")
    }

    #[test]
    fn test_bands() {
        assert_eq!(Band::from_percentage(100.0), Band::Excellent);
        assert_eq!(Band::from_percentage(90.0), Band::Excellent);
        assert_eq!(Band::from_percentage(89.9), Band::Great);
        assert_eq!(Band::from_percentage(80.0), Band::Great);
        assert_eq!(Band::from_percentage(70.0), Band::Good);
        assert_eq!(Band::from_percentage(60.0), Band::Passed);
        assert_eq!(Band::from_percentage(59.9), Band::KeepPracticing);
        assert_eq!(Band::from_percentage(0.0), Band::KeepPracticing);
    }

    #[test]
    fn test_report() {
        let r = Report {
            score: 10,
            total_answered: 10,
        };
        assert_eq!(r.percentage(), 100.0);
        assert_eq!(r.band(), Band::Excellent);

        let r = Report {
            score: 0,
            total_answered: 0,
        };
        assert_eq!(r.percentage(), 0.0);
        assert_eq!(r.band(), Band::KeepPracticing);
    }

    #[test]
    fn test_all_correct() {
        let pool = pool_of(10);
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let mut responder = ScriptedResponder {
            always_correct: true,
            ..Default::default()
        };
        let mut session = Session::new(&pool);
        assert_eq!(session.phase(), Phase::CollectingPreferences);

        let report = session
            .run(&prefs(4, 3, 3, 2, 3, 10), &mut rng, &mut responder)
            .unwrap();
        assert_eq!(session.phase(), Phase::Done);
        assert_eq!(
            report,
            Report {
                score: 10,
                total_answered: 10
            }
        );
        assert_eq!(report.percentage(), 100.0);
        assert_eq!(report.band(), Band::Excellent);

        // Blocks run in order, numbered across blocks, each record asked about once.
        let kinds = responder
            .questions
            .iter()
            .map(|(_, q)| q.kind)
            .collect::<Vec<_>>();
        let mut expected = vec![QuestionKind::Definition; 4];
        expected.extend(vec![QuestionKind::Term; 3]);
        expected.extend(vec![QuestionKind::TrueFalse; 3]);
        assert_eq!(kinds, expected);
        let numbers = responder.questions.iter().map(|(n, _)| *n).collect::<Vec<_>>();
        assert_eq!(numbers, (1..=10).collect::<Vec<_>>());
        let mut records = responder
            .questions
            .iter()
            .map(|(_, q)| q.record)
            .collect::<Vec<_>>();
        records.sort();
        assert_eq!(records, (0..10).collect::<Vec<_>>());
        assert_eq!(session.state().used.len(), 10);

        assert_eq!(
            responder.events.first(),
            Some(&SessionEvent::Started {
                total_questions: 10
            })
        );
        assert_eq!(
            responder.events.last(),
            Some(&SessionEvent::Finished(report))
        );
    }

    #[test]
    fn test_all_wrong() {
        let pool = network_pool();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut responder = ScriptedResponder::default();
        let report = Session::new(&pool)
            .run(&prefs(1, 4, 1, 2, 1, 4), &mut rng, &mut responder)
            .unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.total_answered, 3);
        assert_eq!(report.band(), Band::KeepPracticing);
        let misses = responder
            .events
            .iter()
            .filter(|e| matches!(e, SessionEvent::Answered { correct: false, .. }))
            .count();
        assert_eq!(misses, 3);
    }

    #[test]
    fn test_single_record_pool() {
        // Preferences would reject this, the runner itself still has to cope.
        let pool = pool_of(1);
        let raw = RawPreferences {
            definition_questions: 1,
            definition_choices: 2,
            ..Default::default()
        };
        let preferences = Preferences::new(raw, 2).unwrap();
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let mut responder = ScriptedResponder::default();
        let mut session = Session::new(&pool);
        let report = session.run(&preferences, &mut rng, &mut responder).unwrap();

        assert_eq!(report.total_answered, 0);
        assert_eq!(report.percentage(), 0.0);
        assert!(responder.questions.is_empty());
        assert!(responder
            .events
            .contains(&SessionEvent::BlockTruncated(QuestionKind::Definition)));
        assert!(session.state().used.is_empty());
    }

    #[test]
    fn test_truncated_block_continues() {
        // Four choices per definition question exhaust five records after two questions, the
        // true/false block still gets the remaining three.
        let pool = pool_of(5);
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let mut responder = ScriptedResponder {
            always_correct: true,
            ..Default::default()
        };
        let mut session = Session::new(&pool);
        let report = session
            .run(&prefs(3, 4, 0, 4, 2, 5), &mut rng, &mut responder)
            .unwrap();

        let kinds = responder
            .questions
            .iter()
            .map(|(_, q)| q.kind)
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![
                QuestionKind::Definition,
                QuestionKind::Definition,
                QuestionKind::TrueFalse,
                QuestionKind::TrueFalse
            ]
        );
        assert_eq!(report.total_answered, 4);
        assert!(report.score <= report.total_answered);
        assert!(responder
            .events
            .contains(&SessionEvent::BlockTruncated(QuestionKind::Definition)));
        assert!(!responder
            .events
            .contains(&SessionEvent::BlockTruncated(QuestionKind::TrueFalse)));
    }
}
