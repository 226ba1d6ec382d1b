use super::domain::{ChoiceOption, Domain, OptionGrade, QuestionKind, QuestionSpec};
use super::questionnaire::{Questionnaire, QuestionnaireError};
use super::scoring::{ClassificationBand, ClassificationScale, PerformanceLevel};

/// The four questionnaires, one per domain.
#[derive(Debug, Clone)]
pub struct AssessmentCatalog {
    awareness: Questionnaire,
    routine: Questionnaire,
    wellbeing: Questionnaire,
    activities: Questionnaire,
}

impl AssessmentCatalog {
    pub fn standard() -> Self {
        Self {
            awareness: awareness(),
            routine: routine(),
            wellbeing: wellbeing(),
            activities: activities(),
        }
    }

    pub fn questionnaire(&self, domain: Domain) -> &Questionnaire {
        match domain {
            Domain::Awareness => &self.awareness,
            Domain::Routine => &self.routine,
            Domain::Wellbeing => &self.wellbeing,
            Domain::Activities => &self.activities,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Questionnaire> {
        Domain::ordered()
            .into_iter()
            .map(move |domain| self.questionnaire(domain))
    }

    pub fn validate(&self) -> Result<(), QuestionnaireError> {
        self.iter().try_for_each(Questionnaire::validate)
    }
}

impl Default for AssessmentCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

struct Notes {
    strength: &'static str,
    improvement: &'static str,
}

fn lettered_options(values: [&'static str; 4]) -> Vec<ChoiceOption> {
    values
        .into_iter()
        .zip(OptionGrade::lettered())
        .map(|(value, grade)| ChoiceOption { value, grade })
        .collect()
}

fn lettered(
    id: &'static str,
    section: &'static str,
    prompt: &'static str,
    values: [&'static str; 4],
    notes: Notes,
) -> QuestionSpec {
    QuestionSpec {
        id,
        section,
        prompt,
        kind: QuestionKind::SingleChoice {
            options: lettered_options(values),
        },
        strength: notes.strength,
        improvement: notes.improvement,
    }
}

fn strategies(
    id: &'static str,
    section: &'static str,
    prompt: &'static str,
    values: [&'static str; 4],
    notes: Notes,
) -> QuestionSpec {
    QuestionSpec {
        id,
        section,
        prompt,
        kind: QuestionKind::MultiChoice {
            options: lettered_options(values),
        },
        strength: notes.strength,
        improvement: notes.improvement,
    }
}

fn yes_no(
    id: &'static str,
    section: &'static str,
    prompt: &'static str,
    notes: Notes,
) -> QuestionSpec {
    QuestionSpec {
        id,
        section,
        prompt,
        kind: QuestionKind::SingleChoice {
            options: vec![
                ChoiceOption {
                    value: "Yes",
                    grade: OptionGrade::Strongest,
                },
                ChoiceOption {
                    value: "No",
                    grade: OptionGrade::Weak,
                },
            ],
        },
        strength: notes.strength,
        improvement: notes.improvement,
    }
}

fn level(
    id: &'static str,
    section: &'static str,
    prompt: &'static str,
    notes: Notes,
) -> QuestionSpec {
    QuestionSpec {
        id,
        section,
        prompt,
        kind: QuestionKind::Scale { min: 1, max: 5 },
        strength: notes.strength,
        improvement: notes.improvement,
    }
}

/// Peak, moderate and low floors; the very-low band always starts at zero.
fn four_bands(
    thresholds: [u32; 3],
    labels: [&'static str; 4],
    messages: [&'static str; 4],
) -> ClassificationScale {
    let [peak, moderate, low] = thresholds;
    let mut levels = PerformanceLevel::ordered();
    levels.reverse();

    ClassificationScale::from_bands(
        [peak, moderate, low, 0]
            .into_iter()
            .zip(levels)
            .zip(labels.into_iter().zip(messages))
            .map(|((min_score, level), (label, message))| ClassificationBand {
                min_score,
                level,
                label,
                message,
            })
            .collect(),
    )
}

fn awareness() -> Questionnaire {
    const AWARENESS: &str = "Section 1: Awareness";
    const ALIGNMENT: &str = "Section 2: Task Alignment";
    const HABITS: &str = "Section 3: Consistency and Habits";
    const REFLECTION: &str = "Section 4: Self-Reflection";

    Questionnaire::from_parts(
        Domain::Awareness,
        "Energy Awareness Test",
        "Answer the following questions to assess your energy performance level.",
        vec![
            yes_no(
                "q1",
                AWARENESS,
                "Do you feel you understand your natural energy highs and lows during the day?",
                Notes {
                    strength: "You understand your natural energy highs and lows.",
                    improvement: "Work on understanding your natural energy highs and lows during the day.",
                },
            ),
            level(
                "q2",
                AWARENESS,
                "How well can you predict your peak energy times during the day?",
                Notes {
                    strength: "You can reliably predict your peak energy times.",
                    improvement: "Improve your ability to predict peak energy times by observing your daily patterns.",
                },
            ),
            lettered(
                "q3",
                AWARENESS,
                "How do you become aware of your energy levels?",
                [
                    "A. Through regular tracking or journaling.",
                    "B. Occasionally reflect on energy levels.",
                    "C. Only notice during extreme highs/lows.",
                    "D. Rarely think about energy levels.",
                ],
                Notes {
                    strength: "You track your energy levels deliberately.",
                    improvement: "Consider tracking your energy levels regularly to increase awareness.",
                },
            ),
            level(
                "q4",
                ALIGNMENT,
                "How often do you schedule demanding tasks during your peak energy hours?",
                Notes {
                    strength: "You schedule demanding tasks during your peak energy hours.",
                    improvement: "Try scheduling demanding tasks during your peak energy hours.",
                },
            ),
            strategies(
                "q5",
                ALIGNMENT,
                "What strategies do you use to handle tasks during low energy periods?",
                [
                    "A. Adjust tasks to match energy levels.",
                    "B. Take a short break or recharge.",
                    "C. Push through regardless.",
                    "D. Delay tasks until later.",
                ],
                Notes {
                    strength: "You adapt your work to low-energy periods instead of forcing it.",
                    improvement: "Adopt better strategies for managing low-energy periods, like taking breaks or adjusting tasks.",
                },
            ),
            yes_no(
                "q6",
                HABITS,
                "Do you maintain a consistent sleep schedule to optimize energy usage?",
                Notes {
                    strength: "You keep a consistent sleep schedule.",
                    improvement: "Maintain a consistent sleep schedule to optimize energy usage.",
                },
            ),
            level(
                "q7",
                HABITS,
                "How consistent are you in taking regular breaks during work hours?",
                Notes {
                    strength: "You take regular breaks during work hours.",
                    improvement: "Take regular breaks during work hours to recharge and improve productivity.",
                },
            ),
            yes_no(
                "q8",
                REFLECTION,
                "Do you feel in control of your energy usage daily?",
                Notes {
                    strength: "You feel in control of your daily energy usage.",
                    improvement: "Focus on strategies to feel more in control of your energy usage daily.",
                },
            ),
            level(
                "q9",
                REFLECTION,
                "How satisfied are you with your current energy management?",
                Notes {
                    strength: "You are satisfied with your current energy management.",
                    improvement: "Work on improving your satisfaction with your current energy management practices.",
                },
            ),
        ],
        four_bands(
            [36, 24, 12],
            [
                "Peak Performance",
                "Moderate Performance",
                "Low Performance",
                "Very Low Performance",
            ],
            [
                "Keep up the excellent energy management!",
                "Focus on consistency to improve further.",
                "Consider building better routines and tracking energy.",
                "Let's work on understanding your energy patterns.",
            ],
        ),
    )
}

fn routine() -> Questionnaire {
    const CONSISTENCY: &str = "Section 1: Consistency";
    const RESILIENCE: &str = "Section 2: Resilience Under Pressure";
    const GROWTH: &str = "Section 3: Growth and Learning";
    const SELF_CARE: &str = "Section 4: Self-Care and Balance";

    Questionnaire::from_parts(
        Domain::Routine,
        "Routine and Resilience Assessment",
        "Evaluate your consistency, resilience, adaptability, and self-care habits to understand your ability to maintain and adapt routines.",
        vec![
            lettered(
                "q1",
                CONSISTENCY,
                "How consistent are you in maintaining daily routines?",
                [
                    "A. Extremely consistent, I rarely miss a day.",
                    "B. Fairly consistent, but I occasionally skip.",
                    "C. Inconsistent, I struggle to maintain routines.",
                    "D. Not consistent at all.",
                ],
                Notes {
                    strength: "You maintain your daily routines consistently.",
                    improvement: "Anchor a few daily routines and protect them on busy days.",
                },
            ),
            lettered(
                "q2",
                CONSISTENCY,
                "How often do you review and adapt your habits based on changing circumstances?",
                [
                    "A. Regularly, I reflect and adjust proactively.",
                    "B. Occasionally, when I feel the need for improvement.",
                    "C. Rarely, I resist changing routines.",
                    "D. Never, I stick to the same habits regardless of outcomes.",
                ],
                Notes {
                    strength: "You review and adapt your habits proactively.",
                    improvement: "Schedule a regular review of your habits and adjust them to new circumstances.",
                },
            ),
            lettered(
                "q3",
                RESILIENCE,
                "When faced with unexpected challenges, how do you respond?",
                [
                    "A. I adjust quickly and stay focused on my goals.",
                    "B. I adapt eventually but feel stressed initially.",
                    "C. I struggle to find my footing and often feel overwhelmed.",
                    "D. I avoid addressing challenges and feel stuck.",
                ],
                Notes {
                    strength: "You adjust quickly to unexpected challenges.",
                    improvement: "Prepare simple fallback plans so unexpected challenges feel less overwhelming.",
                },
            ),
            lettered(
                "q4",
                RESILIENCE,
                "How do you handle setbacks in your plans or goals?",
                [
                    "A. I reflect, learn, and create new plans quickly.",
                    "B. I recover eventually but dwell on the setback for some time.",
                    "C. I find it difficult to recover and lose momentum.",
                    "D. I often abandon goals after setbacks.",
                ],
                Notes {
                    strength: "You learn from setbacks and re-plan quickly.",
                    improvement: "After a setback, write down one lesson and one next step before moving on.",
                },
            ),
            lettered(
                "q5",
                GROWTH,
                "How actively do you seek opportunities for self-improvement and learning?",
                [
                    "A. Very actively, I regularly challenge myself to grow.",
                    "B. Fairly actively, I take opportunities as they come.",
                    "C. Occasionally, but I often delay action.",
                    "D. Rarely, I avoid stepping out of my comfort zone.",
                ],
                Notes {
                    strength: "You actively seek opportunities to learn and grow.",
                    improvement: "Pick one small learning goal and commit to a first step this week.",
                },
            ),
            lettered(
                "q6",
                GROWTH,
                "How adaptable are you when trying new strategies or techniques?",
                [
                    "A. Very adaptable, I embrace changes quickly.",
                    "B. Somewhat adaptable, but I hesitate at first.",
                    "C. Rarely adaptable, I prefer sticking to familiar ways.",
                    "D. Not adaptable, I resist trying new approaches.",
                ],
                Notes {
                    strength: "You embrace new strategies and techniques.",
                    improvement: "Experiment with one new technique at a time to build adaptability.",
                },
            ),
            lettered(
                "q7",
                SELF_CARE,
                "How often do you prioritize self-care (e.g., rest, hobbies, mindfulness)?",
                [
                    "A. Always, I balance work and self-care effectively.",
                    "B. Often, but I neglect self-care during busy times.",
                    "C. Rarely, I focus more on tasks than on self-care.",
                    "D. Never, I view self-care as a low priority.",
                ],
                Notes {
                    strength: "You balance work and self-care effectively.",
                    improvement: "Treat self-care as a scheduled commitment rather than a reward.",
                },
            ),
        ],
        four_bands(
            [28, 20, 12],
            [
                "Peak Consistency and Resilience",
                "Moderate Consistency and Resilience",
                "Low Consistency and Resilience",
                "Very Low Consistency and Resilience",
            ],
            [
                "You excel at maintaining and adapting routines effectively!",
                "Fine-tuning routines and resilience strategies will help you improve.",
                "Focus on building stronger routines and adaptability.",
                "Prioritize strategies to regain balance and build resilience.",
            ],
        ),
    )
}

fn wellbeing() -> Questionnaire {
    const BALANCE: &str = "Section 1: Work-Life Balance";
    const HEALTH: &str = "Section 2: Physical and Mental Well-Being";
    const SOCIAL: &str = "Section 3: Social and Emotional Health";
    const RECOVERY: &str = "Section 4: Rest and Recovery";

    Questionnaire::from_parts(
        Domain::Wellbeing,
        "Well-Being and Balance Assessment",
        "Evaluate your current state of work-life balance, physical and mental well-being, and overall recovery habits.",
        vec![
            lettered(
                "q1",
                BALANCE,
                "How often do you set boundaries between work and personal time?",
                [
                    "A. Always, I maintain clear boundaries.",
                    "B. Often, but I occasionally let them overlap.",
                    "C. Rarely, work often spills into personal time.",
                    "D. Never, I struggle to separate the two.",
                ],
                Notes {
                    strength: "You maintain a healthy balance between work and personal life.",
                    improvement: "Work on creating a healthier balance between work and personal life.",
                },
            ),
            lettered(
                "q2",
                BALANCE,
                "Do you allocate time for activities that rejuvenate you (e.g., hobbies, relaxation)?",
                [
                    "A. Always, I make it a priority.",
                    "B. Often, but not consistently.",
                    "C. Rarely, I find it hard to make time.",
                    "D. Never, I\u{2019}m too busy to focus on myself.",
                ],
                Notes {
                    strength: "You dedicate time for activities like hobbies or relaxation.",
                    improvement: "Dedicate time daily for personal activities like hobbies or relaxation.",
                },
            ),
            lettered(
                "q3",
                HEALTH,
                "How consistent are you in maintaining physical health (e.g., exercise, healthy diet)?",
                [
                    "A. Very consistent, I prioritize my physical well-being.",
                    "B. Fairly consistent, but I occasionally slip.",
                    "C. Inconsistent, I struggle to maintain a routine.",
                    "D. Not consistent at all.",
                ],
                Notes {
                    strength: "You are consistent in maintaining a healthy lifestyle (e.g., diet, exercise).",
                    improvement: "Focus on maintaining a more consistent healthy lifestyle (e.g., diet, exercise).",
                },
            ),
            lettered(
                "q4",
                HEALTH,
                "How often do you take steps to manage stress (e.g., mindfulness, breaks, support)?",
                [
                    "A. Always, I actively manage stress effectively.",
                    "B. Often, but I could improve my strategies.",
                    "C. Rarely, I manage stress reactively.",
                    "D. Never, I feel overwhelmed most of the time.",
                ],
                Notes {
                    strength: "You practice stress-relief techniques regularly.",
                    improvement: "Incorporate mindfulness or stress-relief techniques into your routine.",
                },
            ),
            lettered(
                "q5",
                SOCIAL,
                "Do you regularly spend quality time with family, friends, or a support system?",
                [
                    "A. Always, I maintain strong relationships.",
                    "B. Often, but I sometimes get too busy.",
                    "C. Rarely, I feel disconnected at times.",
                    "D. Never, I struggle to maintain connections.",
                ],
                Notes {
                    strength: "You feel well-connected with your family and friends.",
                    improvement: "Work on strengthening connections with family and friends.",
                },
            ),
            lettered(
                "q6",
                SOCIAL,
                "How well do you handle emotional challenges or setbacks?",
                [
                    "A. Very well, I address them constructively.",
                    "B. Fairly well, but I sometimes need help.",
                    "C. Rarely well, I often feel stuck.",
                    "D. Not well at all, I feel overwhelmed.",
                ],
                Notes {
                    strength: "You address emotional challenges constructively.",
                    improvement: "Find ways to manage mental energy better and reduce feelings of exhaustion.",
                },
            ),
            lettered(
                "q7",
                RECOVERY,
                "Do you consistently prioritize adequate sleep and recovery time?",
                [
                    "A. Always, I have a consistent sleep and recovery routine.",
                    "B. Often, but I occasionally sacrifice rest for other tasks.",
                    "C. Rarely, I prioritize other tasks over rest.",
                    "D. Never, I frequently feel sleep-deprived and fatigued.",
                ],
                Notes {
                    strength: "You protect your sleep and recovery time.",
                    improvement: "Regularly evaluate your rest and make necessary adjustments.",
                },
            ),
        ],
        four_bands(
            [28, 20, 12],
            [
                "Peak Balance",
                "Moderate Balance",
                "Low Balance",
                "Very Low Balance",
            ],
            [
                "You excel at sustaining a healthy work-life balance!",
                "Consider fine-tuning routines to enhance well-being.",
                "Focus on improving boundaries and routines.",
                "Prioritize self-care and rest to improve your well-being.",
            ],
        ),
    )
}

fn activities() -> Questionnaire {
    const PRIORITIZATION: &str = "Section 1: Task Prioritization";
    const GOALS: &str = "Section 2: Clarity of Goals";
    const IMPACT: &str = "Section 3: Awareness of Impact";
    const FOCUS: &str = "Section 4: Productivity and Focus";

    Questionnaire::from_parts(
        Domain::Activities,
        "Task Prioritization and Activity Impact Test",
        "Answer the following questions to evaluate your ability to prioritize tasks and focus on high-impact activities.",
        vec![
            lettered(
                "q1",
                PRIORITIZATION,
                "How often do you prioritize tasks based on their impact rather than urgency?",
                [
                    "A. Always, I focus on high-impact tasks first.",
                    "B. Often, but I sometimes get distracted by urgent tasks.",
                    "C. Rarely, I work on tasks as they come.",
                    "D. Never, I struggle to prioritize effectively.",
                ],
                Notes {
                    strength: "You put high-impact tasks ahead of merely urgent ones.",
                    improvement: "Rank your tasks by impact before starting the day.",
                },
            ),
            lettered(
                "q2",
                PRIORITIZATION,
                "Do you regularly identify which tasks are most critical to your goals?",
                [
                    "A. Yes, I have a clear list of critical tasks.",
                    "B. Sometimes, but I need reminders or reviews.",
                    "C. Rarely, I lack a clear understanding of what\u{2019}s critical.",
                    "D. Never, I treat all tasks equally.",
                ],
                Notes {
                    strength: "You keep a clear list of critical tasks.",
                    improvement: "Identify the few tasks that matter most to your goals and list them.",
                },
            ),
            lettered(
                "q3",
                GOALS,
                "How clear are your goals for each day or week?",
                [
                    "A. Very clear, I know exactly what I need to achieve.",
                    "B. Somewhat clear, but I revisit them frequently.",
                    "C. Rarely clear, I often feel unsure of my objectives.",
                    "D. Not clear at all, I work without specific goals.",
                ],
                Notes {
                    strength: "Your daily and weekly goals are clear.",
                    improvement: "Write down concrete goals for each day or week.",
                },
            ),
            lettered(
                "q4",
                GOALS,
                "Do you break down larger goals into smaller, manageable tasks?",
                [
                    "A. Always, I consistently use task breakdowns.",
                    "B. Often, but I occasionally skip this step.",
                    "C. Rarely, I struggle to break down large goals.",
                    "D. Never, I work without planning steps.",
                ],
                Notes {
                    strength: "You break large goals into manageable tasks.",
                    improvement: "Break larger goals into smaller, manageable steps.",
                },
            ),
            lettered(
                "q5",
                IMPACT,
                "How well do you evaluate the potential impact of tasks before starting them?",
                [
                    "A. Very well, I consider the outcome of each task.",
                    "B. Often, but I sometimes act without thinking it through.",
                    "C. Rarely, I don\u{2019}t evaluate impact effectively.",
                    "D. Never, I complete tasks without assessing their value.",
                ],
                Notes {
                    strength: "You weigh the outcome of a task before starting it.",
                    improvement: "Pause to estimate the impact of a task before committing to it.",
                },
            ),
            lettered(
                "q6",
                IMPACT,
                "How often do you delegate or avoid low-impact activities?",
                [
                    "A. Always, I focus only on tasks that add value.",
                    "B. Often, but I occasionally handle low-impact tasks myself.",
                    "C. Rarely, I find it difficult to delegate or avoid tasks.",
                    "D. Never, I handle all tasks regardless of impact.",
                ],
                Notes {
                    strength: "You delegate or drop low-impact activities.",
                    improvement: "Delegate or drop low-impact activities where you can.",
                },
            ),
            lettered(
                "q7",
                FOCUS,
                "How focused are you when working on high-impact tasks?",
                [
                    "A. Fully focused, I eliminate distractions.",
                    "B. Mostly focused, but I sometimes get distracted.",
                    "C. Rarely focused, I struggle to maintain concentration.",
                    "D. Not focused at all, I find it hard to concentrate.",
                ],
                Notes {
                    strength: "You stay fully focused on high-impact work.",
                    improvement: "Remove distractions while working on high-impact tasks.",
                },
            ),
            lettered(
                "q8",
                FOCUS,
                "How often do you reflect on whether your efforts are aligned with your long-term goals?",
                [
                    "A. Regularly, I consistently evaluate my progress.",
                    "B. Sometimes, but I need reminders to reflect.",
                    "C. Rarely, I don\u{2019}t reflect on my goals.",
                    "D. Never, I work without alignment to goals.",
                ],
                Notes {
                    strength: "You regularly check your efforts against long-term goals.",
                    improvement: "Set a recurring moment to check your efforts against long-term goals.",
                },
            ),
        ],
        four_bands(
            [28, 20, 12],
            [
                "Optimal Prioritization",
                "Moderate Prioritization",
                "Low Prioritization",
                "Very Low Prioritization",
            ],
            [
                "You excel at focusing on high-impact tasks!",
                "Consider refining your focus for better impact.",
                "Work on clarity and task alignment.",
                "Start by identifying critical tasks and goals.",
            ],
        ),
    )
}
