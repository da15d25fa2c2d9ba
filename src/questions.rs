use crate::component::{Component, ComponentKind};
use crate::summary::ComponentSummary;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

const DIFFICULTIES: [Difficulty; 3] = [
    Difficulty::Beginner,
    Difficulty::Intermediate,
    Difficulty::Advanced,
];

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated interview question about a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
    /// Name of the component the question is about.
    pub component: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
}

/// Generate `count` questions over the summarized components.
///
/// `focus` narrows the pool by case-insensitive substring match on component
/// name or docstring; a focus that matches nothing leaves the pool intact.
/// The pool is shuffled (seeded when `seed` is given), then questions are
/// dealt round-robin across components and difficulty templates, repeating
/// components as needed to reach `count`.
pub fn generate(
    summaries: &[ComponentSummary],
    focus: Option<&str>,
    count: usize,
    seed: Option<u64>,
) -> Vec<Question> {
    let mut pool: Vec<&ComponentSummary> = match focus {
        Some(needle) => {
            let needle = needle.to_lowercase();
            let focused: Vec<&ComponentSummary> = summaries
                .iter()
                .filter(|s| {
                    s.component.name.to_lowercase().contains(&needle)
                        || s.component
                            .docstring
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&needle))
                })
                .collect();
            if focused.is_empty() {
                summaries.iter().collect()
            } else {
                focused
            }
        }
        None => summaries.iter().collect(),
    };
    if pool.is_empty() {
        return Vec::new();
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    pool.shuffle(&mut rng);

    (0..count)
        .map(|idx| {
            render(
                DIFFICULTIES[idx % DIFFICULTIES.len()],
                &pool[idx % pool.len()].component,
            )
        })
        .collect()
}

fn render(difficulty: Difficulty, c: &Component) -> Question {
    let kind = c.kind.label();
    // Functions carry their file inside the backticked name.
    let display_name = match c.kind {
        ComponentKind::Function => format!("{}` in `{}", c.name, c.file.display()),
        ComponentKind::Class => c.name.clone(),
    };

    let (question, answer) = match difficulty {
        Difficulty::Beginner => (
            format!("What is the purpose of the {kind} `{display_name}`?"),
            format!(
                "The {kind} `{}` is defined in {} at line {}. This component is responsible for implementing its declared functionality.",
                c.name,
                c.file.display(),
                c.lineno
            ),
        ),
        Difficulty::Intermediate => (
            format!("How does the {kind} `{display_name}` interact with other components?"),
            format!(
                "The {kind} `{display_name}` may interact with other classes or functions in the codebase."
            ),
        ),
        Difficulty::Advanced => (
            format!("How could the {kind} `{display_name}` be optimized or improved?"),
            format!(
                "Potential optimizations for `{display_name}` could include refactoring, improving efficiency, or enhancing documentation."
            ),
        ),
    };

    Question {
        question,
        answer,
        difficulty,
        component: c.name.clone(),
        kind: c.kind,
    }
}
