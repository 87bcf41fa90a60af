//! Form state store
//!
//! Owns every mutation of the planner form. The habit and goal lists sit
//! behind `Rc`; each edit builds a new list and swaps it in, so a view that
//! kept the previous `Rc` can detect the change with `Rc::ptr_eq`.

use std::rc::Rc;

use super::snapshot::{Goal, Habit, PlannerSnapshot};
use crate::consts::{DAYS_PER_WEEK, GOAL_COUNT, HABIT_COUNT, STEPS_PER_GOAL};
use crate::error::PlannerError;

/// Top-level free-text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    DateRange,
    Intention,
    Reward,
    Successes,
    Improvements,
}

impl TextField {
    pub const ALL: [TextField; 5] = [
        TextField::DateRange,
        TextField::Intention,
        TextField::Reward,
        TextField::Successes,
        TextField::Improvements,
    ];

    /// Key used in the stored JSON and in field paths
    pub fn key(&self) -> &'static str {
        match self {
            TextField::DateRange => "dateRange",
            TextField::Intention => "intention",
            TextField::Reward => "reward",
            TextField::Successes => "successes",
            TextField::Improvements => "improvements",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

#[derive(Debug, Clone)]
pub struct FormStore {
    date_range: Rc<str>,
    habits: Rc<[Habit; HABIT_COUNT]>,
    goals: Rc<[Goal; GOAL_COUNT]>,
    intention: Rc<str>,
    reward: Rc<str>,
    successes: Rc<str>,
    improvements: Rc<str>,
    revision: u64,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::from_snapshot(PlannerSnapshot::new())
    }
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: PlannerSnapshot) -> Self {
        Self {
            date_range: snapshot.date_range.into(),
            habits: Rc::new(snapshot.habits),
            goals: Rc::new(snapshot.goals),
            intention: snapshot.intention.into(),
            reward: snapshot.reward.into(),
            successes: snapshot.successes.into(),
            improvements: snapshot.improvements.into(),
            revision: 0,
        }
    }

    /// Bumped on every mutation, including full replacement
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Copy of the whole form, ready to serialize
    pub fn snapshot(&self) -> PlannerSnapshot {
        PlannerSnapshot {
            date_range: self.date_range.to_string(),
            habits: (*self.habits).clone(),
            goals: (*self.goals).clone(),
            intention: self.intention.to_string(),
            reward: self.reward.to_string(),
            successes: self.successes.to_string(),
            improvements: self.improvements.to_string(),
        }
    }

    /// Replace everything; restore never merges into the current state.
    pub fn replace(&mut self, snapshot: PlannerSnapshot) {
        let revision = self.revision + 1;
        *self = Self::from_snapshot(snapshot);
        self.revision = revision;
    }

    pub fn reset(&mut self) {
        self.replace(PlannerSnapshot::new());
    }

    pub fn text(&self, field: TextField) -> &str {
        self.text_slot(field)
    }

    pub fn set_text(&mut self, field: TextField, value: impl Into<Rc<str>>) {
        *self.text_slot_mut(field) = value.into();
        self.revision += 1;
    }

    pub fn habits(&self) -> &Rc<[Habit; HABIT_COUNT]> {
        &self.habits
    }

    pub fn goals(&self) -> &Rc<[Goal; GOAL_COUNT]> {
        &self.goals
    }

    pub fn set_habit_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), PlannerError> {
        check_index("habits", index, HABIT_COUNT)?;
        let name = name.into();
        self.update_habits(|habits| habits[index].name = name);
        Ok(())
    }

    pub fn set_habit_day(&mut self, index: usize, day: usize, done: bool) -> Result<(), PlannerError> {
        check_index("habits", index, HABIT_COUNT)?;
        check_index("days", day, DAYS_PER_WEEK)?;
        self.update_habits(|habits| habits[index].days[day] = done);
        Ok(())
    }

    /// Flip a day checkbox, returning its new value
    pub fn toggle_habit_day(&mut self, index: usize, day: usize) -> Result<bool, PlannerError> {
        check_index("habits", index, HABIT_COUNT)?;
        check_index("days", day, DAYS_PER_WEEK)?;
        let done = !self.habits[index].days[day];
        self.update_habits(|habits| habits[index].days[day] = done);
        Ok(done)
    }

    pub fn set_goal_name(&mut self, index: usize, name: impl Into<String>) -> Result<(), PlannerError> {
        check_index("goals", index, GOAL_COUNT)?;
        let name = name.into();
        self.update_goals(|goals| goals[index].name = name);
        Ok(())
    }

    pub fn set_goal_step(
        &mut self,
        index: usize,
        step: usize,
        text: impl Into<String>,
    ) -> Result<(), PlannerError> {
        check_index("goals", index, GOAL_COUNT)?;
        check_index("steps", step, STEPS_PER_GOAL)?;
        let text = text.into();
        self.update_goals(|goals| goals[index].steps[step] = text);
        Ok(())
    }

    fn update_habits(&mut self, edit: impl FnOnce(&mut [Habit; HABIT_COUNT])) {
        let mut habits = (*self.habits).clone();
        edit(&mut habits);
        self.habits = Rc::new(habits);
        self.revision += 1;
    }

    fn update_goals(&mut self, edit: impl FnOnce(&mut [Goal; GOAL_COUNT])) {
        let mut goals = (*self.goals).clone();
        edit(&mut goals);
        self.goals = Rc::new(goals);
        self.revision += 1;
    }

    fn text_slot(&self, field: TextField) -> &Rc<str> {
        match field {
            TextField::DateRange => &self.date_range,
            TextField::Intention => &self.intention,
            TextField::Reward => &self.reward,
            TextField::Successes => &self.successes,
            TextField::Improvements => &self.improvements,
        }
    }

    fn text_slot_mut(&mut self, field: TextField) -> &mut Rc<str> {
        match field {
            TextField::DateRange => &mut self.date_range,
            TextField::Intention => &mut self.intention,
            TextField::Reward => &mut self.reward,
            TextField::Successes => &mut self.successes,
            TextField::Improvements => &mut self.improvements,
        }
    }
}

fn check_index(container: &'static str, index: usize, len: usize) -> Result<(), PlannerError> {
    if index < len {
        Ok(())
    } else {
        Err(PlannerError::IndexOutOfRange { container, index, len })
    }
}
