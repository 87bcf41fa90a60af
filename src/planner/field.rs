//! Addressable form fields
//!
//! Form controls name the value they edit with a dotted path such as
//! `habits.0.days.6` or `goals.2.steps.0`, mirroring the stored JSON.

use std::fmt;
use std::str::FromStr;

use super::store::{FormStore, TextField};
use crate::consts::{DAYS_PER_WEEK, GOAL_COUNT, HABIT_COUNT, STEPS_PER_GOAL};
use crate::error::PlannerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Text(TextField),
    HabitName(usize),
    HabitDay(usize, usize),
    GoalName(usize),
    GoalStep(usize, usize),
}

/// Value coming from a form control
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Checked(bool),
}

impl FieldPath {
    /// Whether the control behind this path is a checkbox
    pub fn is_checkbox(&self) -> bool {
        matches!(self, FieldPath::HabitDay(..))
    }

    /// Current value of this field in `store`, `None` when an index is out
    /// of range
    pub fn read(&self, store: &FormStore) -> Option<FieldValue> {
        let value = match *self {
            FieldPath::Text(field) => FieldValue::Text(store.text(field).to_string()),
            FieldPath::HabitName(i) => FieldValue::Text(store.habits().get(i)?.name.clone()),
            FieldPath::HabitDay(i, d) => FieldValue::Checked(*store.habits().get(i)?.days.get(d)?),
            FieldPath::GoalName(i) => FieldValue::Text(store.goals().get(i)?.name.clone()),
            FieldPath::GoalStep(i, s) => FieldValue::Text(store.goals().get(i)?.steps.get(s)?.clone()),
        };
        Some(value)
    }

    /// Write `value` into `store`
    pub fn apply(&self, store: &mut FormStore, value: FieldValue) -> Result<(), PlannerError> {
        match (*self, value) {
            (FieldPath::Text(field), FieldValue::Text(text)) => {
                store.set_text(field, text);
                Ok(())
            }
            (FieldPath::HabitName(i), FieldValue::Text(text)) => store.set_habit_name(i, text),
            (FieldPath::HabitDay(i, d), FieldValue::Checked(done)) => store.set_habit_day(i, d, done),
            (FieldPath::GoalName(i), FieldValue::Text(text)) => store.set_goal_name(i, text),
            (FieldPath::GoalStep(i, s), FieldValue::Text(text)) => store.set_goal_step(i, s, text),
            (path, _) => Err(PlannerError::WrongValueKind {
                field: path.to_string(),
                expected: if path.is_checkbox() { "boolean" } else { "text" },
            }),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Text(field) => f.write_str(field.key()),
            FieldPath::HabitName(i) => write!(f, "habits.{i}.name"),
            FieldPath::HabitDay(i, d) => write!(f, "habits.{i}.days.{d}"),
            FieldPath::GoalName(i) => write!(f, "goals.{i}.name"),
            FieldPath::GoalStep(i, s) => write!(f, "goals.{i}.steps.{s}"),
        }
    }
}

impl FromStr for FieldPath {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || PlannerError::UnknownField(s.to_string());
        let parts: Vec<&str> = s.split('.').collect();
        let index = |part: &str, len: usize| -> Result<usize, PlannerError> {
            match part.parse::<usize>() {
                Ok(i) if i < len => Ok(i),
                _ => Err(unknown()),
            }
        };

        let path = match parts.as_slice() {
            [key] => FieldPath::Text(TextField::from_key(key).ok_or_else(unknown)?),
            ["habits", i, "name"] => FieldPath::HabitName(index(*i, HABIT_COUNT)?),
            ["habits", i, "days", d] => {
                FieldPath::HabitDay(index(*i, HABIT_COUNT)?, index(*d, DAYS_PER_WEEK)?)
            }
            ["goals", i, "name"] => FieldPath::GoalName(index(*i, GOAL_COUNT)?),
            ["goals", i, "steps", j] => {
                FieldPath::GoalStep(index(*i, GOAL_COUNT)?, index(*j, STEPS_PER_GOAL)?)
            }
            _ => return Err(unknown()),
        };
        Ok(path)
    }
}
