use itertools::Itertools;
use std::sync::LazyLock;
use thiserror::Error;

pub const CHOICES_PER_QUESTION: usize = 4;
pub const MAX_CHOICE_WEIGHT: u8 = 3;

/// The standard 21-item bank, built once per process.
pub static BANK: LazyLock<QuestionBank> = LazyLock::new(QuestionBank::standard);

/// One of the four statements a user can pick for a question.
///
/// Weight is positional: statement 0 is "no symptom", statement 3 is the
/// most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub text: &'static str,
    pub weight: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    /// Position in the bank. Order is significant.
    pub index: usize,
    /// The symptom this question screens for, e.g. "Sadness".
    pub prompt: &'static str,
    pub choices: [Choice; CHOICES_PER_QUESTION],
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("question index {index} is out of range for a bank of {size} questions")]
pub struct OutOfRangeError {
    pub index: usize,
    pub size: usize,
}

/// The fixed, ordered question set. Read-only after construction.
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn standard() -> Self {
        let questions = BDI_ITEMS
            .iter()
            .enumerate()
            .map(|(index, &(prompt, statements))| Question {
                index,
                prompt,
                choices: std::array::from_fn(|weight| Choice {
                    text: statements[weight],
                    weight: weight as u8,
                }),
            })
            .collect_vec();

        QuestionBank { questions }
    }

    pub fn get(&self, index: usize) -> Result<&Question, OutOfRangeError> {
        self.questions.get(index).ok_or(OutOfRangeError {
            index,
            size: self.questions.len(),
        })
    }

    pub fn size(&self) -> usize {
        self.questions.len()
    }

    /// The highest total score a session can reach.
    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32 * u32::from(MAX_CHOICE_WEIGHT)
    }
}

const BDI_ITEMS: [(&str, [&str; CHOICES_PER_QUESTION]); 21] = [
    (
        "Sadness",
        [
            "I do not feel sad.",
            "I feel sad much of the time.",
            "I am sad all the time.",
            "I am so sad or unhappy that I can't stand it.",
        ],
    ),
    (
        "Pessimism",
        [
            "I am not discouraged about my future.",
            "I feel more discouraged about my future than I used to be.",
            "I do not expect things to work out for me.",
            "I feel my future is hopeless and will only get worse.",
        ],
    ),
    (
        "Past failure",
        [
            "I do not feel like a failure.",
            "I have failed more than I should have.",
            "As I look back, I see a lot of failures.",
            "I feel I am a complete failure as a person.",
        ],
    ),
    (
        "Loss of pleasure",
        [
            "I get as much pleasure as I ever did from the things I enjoy.",
            "I don't enjoy things as much as I used to.",
            "I get very little pleasure from the things I used to enjoy.",
            "I can't get any pleasure from the things I used to enjoy.",
        ],
    ),
    (
        "Guilty feelings",
        [
            "I don't feel particularly guilty.",
            "I feel guilty a good part of the time.",
            "I feel quite guilty most of the time.",
            "I feel guilty all of the time.",
        ],
    ),
    (
        "Punishment feelings",
        [
            "I don't feel I am being punished.",
            "I feel I may be punished.",
            "I expect to be punished.",
            "I feel I am being punished.",
        ],
    ),
    (
        "Self-dislike",
        [
            "I don't feel that I am any worse than anybody else.",
            "I am critical of myself for my weaknesses or mistakes.",
            "I blame myself all the time for my faults.",
            "I blame myself for everything bad that happens.",
        ],
    ),
    (
        "Self-criticalness",
        [
            "I don't criticize or blame myself more than usual.",
            "I am more critical of myself than I used to be.",
            "I criticize myself for all of my faults.",
            "I blame myself for everything that goes wrong.",
        ],
    ),
    (
        "Suicidal thoughts or wishes",
        [
            "I don't have any thoughts of killing myself.",
            "I have thoughts of killing myself, but I would not carry them out.",
            "I would like to kill myself.",
            "I would kill myself if I had the chance.",
        ],
    ),
    (
        "Crying",
        [
            "I don't cry any more than usual.",
            "I cry more now than I used to.",
            "I cry all the time now.",
            "I used to be able to cry, but now I can't cry even though I want to.",
        ],
    ),
    (
        "Agitation",
        [
            "I am no more restless or wound up than usual.",
            "I feel more restless or wound up than usual.",
            "I am so restless or agitated that it's hard to stay still.",
            "I am so restless or agitated that I have to keep moving or doing something.",
        ],
    ),
    (
        "Loss of interest",
        [
            "I have not lost interest in other people.",
            "I am less interested in other people than I used to be.",
            "I have lost most of my interest in other people.",
            "I have lost all of my interest in other people.",
        ],
    ),
    (
        "Indecisiveness",
        [
            "I make decisions about as well as ever.",
            "I put off making decisions more than I used to.",
            "I have greater difficulty in making decisions more than I used to.",
            "I can't make decisions at all anymore.",
        ],
    ),
    (
        "Worthlessness",
        [
            "I don't feel that I am worthless.",
            "I don't consider myself as worthwhile and useful as I used to.",
            "I feel more worthless as compared to others.",
            "I feel completely worthless.",
        ],
    ),
    (
        "Loss of energy",
        [
            "I have as much energy as ever.",
            "I have less energy than I used to have.",
            "I don't have enough energy to do much.",
            "I don't have enough energy to do anything.",
        ],
    ),
    (
        "Changes in sleeping pattern",
        [
            "I have not experienced any change in my sleeping pattern.",
            "I sleep somewhat more than usual.",
            "I sleep somewhat less than usual.",
            "I sleep a lot less than usual.",
        ],
    ),
    (
        "Irritability",
        [
            "I am no more irritable than usual.",
            "I am more irritable than usual.",
            "I am much more irritable than usual.",
            "I am irritable all the time.",
        ],
    ),
    (
        "Changes in appetite",
        [
            "My appetite is no different than usual.",
            "My appetite is not as good as it used to be.",
            "My appetite is much worse now.",
            "I have no appetite at all anymore.",
        ],
    ),
    (
        "Concentration difficulties",
        [
            "I can concentrate as well as ever.",
            "I can't concentrate as well as usual.",
            "It's hard to keep my mind on anything for very long.",
            "I find I can't concentrate on anything.",
        ],
    ),
    (
        "Tiredness or fatigue",
        [
            "I am no more tired or fatigued than usual.",
            "I get more tired or fatigued more easily than I used to.",
            "I am too tired or fatigued to do many of the things I used to do.",
            "I am too tired or fatigued to do most of the things I used to do.",
        ],
    ),
    (
        "Loss of interest in sex",
        [
            "I have not noticed any recent change in my interest in sex.",
            "I am less interested in sex than I used to be.",
            "I have lost interest in sex completely.",
            "I find sex completely unappealing.",
        ],
    ),
];
