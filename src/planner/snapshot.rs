//! Planner data model and restore merging
//!
//! A `PlannerSnapshot` is the unit of persistence. The fixed shape
//! (3 habits x 7 days, 3 goals x 3 steps) lives in the types, so no edit
//! can change it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::{DAYS_PER_WEEK, GOAL_COUNT, HABIT_COUNT, STEPS_PER_GOAL};

/// A tracked habit with one checkbox per weekday (Monday first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub name: String,
    pub days: [bool; DAYS_PER_WEEK],
}

/// A weekly goal broken into steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    pub steps: [String; STEPS_PER_GOAL],
}

/// Complete state of the planner form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerSnapshot {
    /// Free-form week label, usually `dd.mm - dd.mm`
    pub date_range: String,
    pub habits: [Habit; HABIT_COUNT],
    pub goals: [Goal; GOAL_COUNT],
    pub intention: String,
    pub reward: String,
    pub successes: String,
    pub improvements: String,
}

impl PlannerSnapshot {
    /// Empty planner. Initial state, clear and restore all start here.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse stored text, filling anything missing from the defaults.
    ///
    /// Returns `None` when the text is not JSON at all.
    pub fn from_stored(text: &str) -> Option<Self> {
        let parsed: Value = serde_json::from_str(text).ok()?;
        Some(merge_with_defaults(&parsed, Self::new()))
    }
}

/// Build a snapshot from a partially valid parsed value.
///
/// Every field that is missing or has the wrong shape is taken from `base`,
/// element by element for the habit and goal lists. A value that is not an
/// object yields `base` unchanged.
pub fn merge_with_defaults(parsed: &Value, base: PlannerSnapshot) -> PlannerSnapshot {
    let Some(obj) = parsed.as_object() else {
        return base;
    };

    let text = |key: &str, fallback: String| -> String {
        match obj.get(key) {
            Some(Value::String(s)) => s.clone(),
            _ => fallback,
        }
    };

    let PlannerSnapshot {
        date_range,
        habits,
        goals,
        intention,
        reward,
        successes,
        improvements,
    } = base;

    PlannerSnapshot {
        date_range: text("dateRange", date_range),
        habits: merge_list(obj.get("habits"), habits, merge_habit),
        goals: merge_list(obj.get("goals"), goals, merge_goal),
        intention: text("intention", intention),
        reward: text("reward", reward),
        successes: text("successes", successes),
        improvements: text("improvements", improvements),
    }
}

fn merge_list<T, const N: usize>(
    value: Option<&Value>,
    base: [T; N],
    merge: fn(&Value, T) -> T,
) -> [T; N] {
    let Some(Value::Array(items)) = value else {
        return base;
    };
    let mut i = 0;
    base.map(|fallback| {
        let merged = match items.get(i) {
            Some(item) => merge(item, fallback),
            None => fallback,
        };
        i += 1;
        merged
    })
}

fn merge_habit(value: &Value, base: Habit) -> Habit {
    let Some(obj) = value.as_object() else {
        return base;
    };
    let name = match obj.get("name") {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    let mut days = [false; DAYS_PER_WEEK];
    if let Some(Value::Array(items)) = obj.get("days") {
        for (slot, item) in days.iter_mut().zip(items) {
            *slot = item.as_bool().unwrap_or(false);
        }
    }
    Habit { name, days }
}

fn merge_goal(value: &Value, base: Goal) -> Goal {
    let Some(obj) = value.as_object() else {
        return base;
    };
    let name = match obj.get("name") {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };
    let mut steps: [String; STEPS_PER_GOAL] = Default::default();
    if let Some(Value::Array(items)) = obj.get("steps") {
        for (slot, item) in steps.iter_mut().zip(items) {
            if let Some(s) = item.as_str() {
                *slot = s.to_string();
            }
        }
    }
    Goal { name, steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn sample() -> PlannerSnapshot {
        let mut s = PlannerSnapshot::new();
        s.date_range = "01.01 - 07.01".into();
        s.habits[0].name = "Running".into();
        s.habits[0].days[0] = true;
        s.habits[2].days[6] = true;
        s.goals[1].name = "Budget".into();
        s.goals[1].steps[2] = "Review card statement".into();
        s.intention = "Be disciplined".into();
        s
    }

    #[test]
    fn test_default_shape() {
        let s = PlannerSnapshot::new();
        assert_eq!(s.habits.len(), HABIT_COUNT);
        assert_eq!(s.goals.len(), GOAL_COUNT);
        assert!(s.habits.iter().all(|h| h.days == [false; 7] && h.name.is_empty()));
        assert!(s.goals.iter().all(|g| g.steps.iter().all(String::is_empty)));
        assert!(s.date_range.is_empty());
    }

    #[test]
    fn test_json_uses_camel_case_keys() {
        let value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(value["dateRange"], "01.01 - 07.01");
        assert_eq!(value["habits"][0]["days"][0], true);
        assert_eq!(value["goals"][1]["steps"].as_array().unwrap().len(), 3);
        assert!(value.get("date_range").is_none());
    }

    #[test]
    fn test_round_trip() {
        let s = sample();
        let restored = PlannerSnapshot::from_stored(&s.to_json().unwrap()).unwrap();
        assert_eq!(restored, s);
    }

    #[test]
    fn test_missing_goals_filled_from_defaults() {
        let mut value: Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        value.as_object_mut().unwrap().remove("goals");

        let restored = merge_with_defaults(&value, PlannerSnapshot::new());
        assert_eq!(restored.goals, PlannerSnapshot::new().goals);

        let expected = PlannerSnapshot {
            goals: PlannerSnapshot::new().goals,
            ..sample()
        };
        assert_eq!(restored, expected);
    }

    #[test]
    fn test_malformed_text_is_absent() {
        assert!(PlannerSnapshot::from_stored("{not json").is_none());
        assert!(PlannerSnapshot::from_stored("").is_none());
    }

    #[test]
    fn test_non_object_yields_base() {
        for text in ["null", "42", "\"hello\"", "[1,2,3]"] {
            assert_eq!(
                PlannerSnapshot::from_stored(text),
                Some(PlannerSnapshot::new()),
                "input {text}"
            );
        }
    }

    #[test]
    fn test_wrong_types_replaced_per_field() {
        let value = json!({
            "dateRange": 17,
            "intention": "keep",
            "reward": null,
            "habits": [
                { "name": 5, "days": [true, "yes", false, true] },
                "not a habit"
            ],
            "goals": { "name": "not a list" }
        });
        let s = merge_with_defaults(&value, PlannerSnapshot::new());

        assert_eq!(s.date_range, "");
        assert_eq!(s.intention, "keep");
        assert_eq!(s.reward, "");
        assert_eq!(s.habits[0].name, "");
        assert_eq!(s.habits[0].days, [true, false, false, true, false, false, false]);
        assert_eq!(s.habits[1], Habit::default());
        assert_eq!(s.habits[2], Habit::default());
        assert_eq!(s.goals, PlannerSnapshot::new().goals);
    }

    #[test]
    fn test_oversized_lists_truncated() {
        let value = json!({
            "habits": [
                { "name": "a", "days": [true, true, true, true, true, true, true, true, true] },
                { "name": "b" }, { "name": "c" }, { "name": "d" }
            ],
            "goals": [
                { "name": "g", "steps": ["1", "2", "3", "4"] }
            ]
        });
        let s = merge_with_defaults(&value, PlannerSnapshot::new());

        assert_eq!(s.habits[0].days, [true; 7]);
        assert_eq!(s.habits[2].name, "c");
        assert_eq!(s.goals[0].steps, ["1", "2", "3"].map(String::from));
        assert_eq!(s.goals[1], Goal::default());
    }

    fn arb_habit() -> impl Strategy<Value = Habit> {
        (".{0,12}", prop::array::uniform7(any::<bool>())).prop_map(|(name, days)| Habit { name, days })
    }

    fn arb_goal() -> impl Strategy<Value = Goal> {
        (".{0,12}", prop::array::uniform3(".{0,12}")).prop_map(|(name, steps)| Goal { name, steps })
    }

    fn arb_snapshot() -> impl Strategy<Value = PlannerSnapshot> {
        (
            ".{0,16}",
            prop::array::uniform3(arb_habit()),
            prop::array::uniform3(arb_goal()),
            prop::array::uniform4(".{0,24}"),
        )
            .prop_map(|(date_range, habits, goals, [intention, reward, successes, improvements])| {
                PlannerSnapshot {
                    date_range,
                    habits,
                    goals,
                    intention,
                    reward,
                    successes,
                    improvements,
                }
            })
    }

    proptest! {
        #[test]
        fn prop_stored_text_restores_equal(s in arb_snapshot()) {
            let text = s.to_json().unwrap();
            prop_assert_eq!(PlannerSnapshot::from_stored(&text), Some(s));
        }
    }
}
