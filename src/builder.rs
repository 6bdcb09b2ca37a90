use crate::sampler;
use crate::traits::{Label, Question, QuestionBuilder, QuestionKind, Record, UsedSet};
use log::debug;
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Shuffle the options, correct one first on entry, and return the correct option's label. The
/// options are tracked by pool index so duplicate texts still yield one definite position.
fn shuffle_options(
    mut options: Vec<(usize, String)>,
    rng: &mut dyn RngCore,
) -> (Vec<String>, Label) {
    let correct = options[0].0;
    options.shuffle(rng);
    let position = options
        .iter()
        .position(|(idx, _)| *idx == correct)
        .expect("correct option survives the shuffle");
    (
        options.into_iter().map(|(_, text)| text).collect(),
        Label(position + 1),
    )
}

fn build_choice(
    kind: QuestionKind,
    choices: usize,
    pool: &[Record],
    used: &mut UsedSet,
    rng: &mut dyn RngCore,
) -> Option<Question> {
    let sample = match sampler::sample(pool.len(), used, choices, rng) {
        Ok(s) => s,
        Err(e) => {
            debug!("can't build {} question: {e}", kind.describe());
            return None;
        }
    };

    // The side of the record that is shown as an option.
    let option_text = |r: &Record| -> String {
        match kind {
            QuestionKind::Term => r.term().to_owned(),
            _ => r.definition().to_owned(),
        }
    };

    let correct = &pool[sample.correct];
    let prompt = match kind {
        QuestionKind::Term => format!(
            "Which term matches this definition: '{}'?",
            correct.definition()
        ),
        _ => format!("What is the definition of '{}'?", correct.term()),
    };

    let mut options = vec![(sample.correct, option_text(correct))];
    options.extend(
        sample
            .distractors
            .iter()
            .map(|&i| (i, option_text(&pool[i]))),
    );
    let (options, correct_label) = shuffle_options(options, rng);

    Some(Question {
        kind,
        prompt,
        options,
        correct_label,
        record: sample.correct,
    })
}

/// Shows a term, asks for its definition.
#[derive(Debug, Clone, Copy)]
pub struct DefinitionChoice {
    pub choices: usize,
}

impl QuestionBuilder for DefinitionChoice {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Definition
    }

    fn build(
        &self,
        pool: &[Record],
        used: &mut UsedSet,
        rng: &mut dyn RngCore,
    ) -> Option<Question> {
        build_choice(QuestionKind::Definition, self.choices, pool, used, rng)
    }
}

/// Shows a definition, asks for its term.
#[derive(Debug, Clone, Copy)]
pub struct TermChoice {
    pub choices: usize,
}

impl QuestionBuilder for TermChoice {
    fn kind(&self) -> QuestionKind {
        QuestionKind::Term
    }

    fn build(
        &self,
        pool: &[Record],
        used: &mut UsedSet,
        rng: &mut dyn RngCore,
    ) -> Option<Question> {
        build_choice(QuestionKind::Term, self.choices, pool, used, rng)
    }
}

/// Pairs a term with either its own definition or someone else's. The wrong definition comes from
/// another unused record; once those run out any other record of the pool is borrowed, so the
/// last question isn't given away. A pool of one record can only ask the true pairing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrueFalse;

impl QuestionBuilder for TrueFalse {
    fn kind(&self) -> QuestionKind {
        QuestionKind::TrueFalse
    }

    fn build(
        &self,
        pool: &[Record],
        used: &mut UsedSet,
        rng: &mut dyn RngCore,
    ) -> Option<Question> {
        let is_true = rng.gen_bool(0.5);
        let (correct, others) = sampler::draw_one(pool.len(), used, rng).ok()?;
        let record = &pool[correct];

        let wrong = if is_true {
            None
        } else if others.is_empty() {
            let retired = (0..pool.len())
                .filter(|&i| i != correct)
                .collect::<Vec<usize>>();
            retired.choose(rng).copied()
        } else {
            others.choose(rng).copied()
        };

        let (definition, correct_label) = match wrong {
            Some(w) => (pool[w].definition(), Label::FALSE),
            None => (record.definition(), Label::TRUE),
        };

        Some(Question {
            kind: QuestionKind::TrueFalse,
            prompt: format!(
                "True or False: The term '{}' means '{}'",
                record.term(),
                definition
            ),
            options: vec!["True".to_owned(), "False".to_owned()],
            correct_label,
            record: correct,
        })
    }
}
