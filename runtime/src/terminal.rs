//! Line-oriented terminal front end
//!
//! Each input line is one command, e.g. `height 180`, `unit imperial` or
//! `gender female`. Field commands keep the raw text the user typed, the
//! same way a form field would.

use crate::controller::{Renderer, WidgetController};
use crate::error::RuntimeResult;
use bmi_widget_shared::{
    ActivityLevel, CalorieGoal, DisplayReport, FieldValues, Gender, ParseEnumError, ToggleOutcome,
    UnitSystem,
};
use std::str::FromStr;

/// Form field a command can edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Height,
    Weight,
    Age,
    Activity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(Field, String),
    Unit(UnitSystem),
    Gender(Gender),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ParseEnumError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let set = |field: Field| -> Result<Command, ParseEnumError> {
            Ok(Command::Set(field, arg.to_string()))
        };
        match name.to_lowercase().as_str() {
            "height" | "h" => set(Field::Height),
            "weight" | "w" => set(Field::Weight),
            "age" | "a" => set(Field::Age),
            "activity" => set(Field::Activity),
            "unit" | "units" => arg.parse().map(Command::Unit),
            "gender" => arg.parse().map(Command::Gender),
            "show" | "" => Ok(Command::Show),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => Err(ParseEnumError::new("command", line)),
        }
    }
}

pub const HELP: &str = "Commands: height <n>, weight <n>, age <n>, activity <level>, \
unit metric|imperial, gender male|female, show, quit";

/// Raw text of the four input fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub height: String,
    pub weight: String,
    pub age: String,
    pub activity: String,
}

impl Default for FormFields {
    /// Activity starts on the first selector option, as a `<select>` would
    fn default() -> Self {
        Self {
            height: String::new(),
            weight: String::new(),
            age: String::new(),
            activity: ActivityLevel::default().as_str().to_string(),
        }
    }
}

impl FormFields {
    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Height => self.height = value,
            Field::Weight => self.weight = value,
            Field::Age => self.age = value,
            Field::Activity => self.activity = value,
        }
    }

    /// Take over the converted height and weight after a unit switch
    pub fn apply(&mut self, fields: &FieldValues) {
        if let Some(height) = &fields.height {
            self.height = height.clone();
        }
        if let Some(weight) = &fields.weight {
            self.weight = weight.clone();
        }
    }
}

/// Prints reports to stdout, either as JSON lines or as a short summary
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    pub json: bool,
}

impl TerminalRenderer {
    pub fn summary(report: &DisplayReport) -> String {
        let mut out = format!(
            "BMI {} {} ({})\nHealthy BMI: {}  Healthy weight: {}\nBMI Prime: {}  Ponderal index: {}",
            report.bmi,
            report.bmi_unit_label,
            report.category_label,
            report.healthy_bmi_range,
            report.healthy_weight_range,
            report.bmi_prime,
            report.ponderal_index,
        );
        for (slot, label) in [
            (CalorieGoal::Maintain, "Maintain"),
            (CalorieGoal::Lose, "Lose"),
            (CalorieGoal::Gain, "Gain"),
        ] {
            if let Some(text) = report.calories.slot_text(slot) {
                out.push_str(&format!("\n{}: {}", label, text));
            }
        }
        out.push('\n');
        out.push_str(&report.fitness_advice);
        out
    }
}

impl Renderer for TerminalRenderer {
    fn render(&self, report: &DisplayReport) {
        if self.json {
            match serde_json::to_string(report) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::error!("Failed to serialize report: {}", e),
            }
        } else {
            println!("{}\n", Self::summary(report));
        }
    }

    fn rewrite_fields(&self, fields: &FieldValues) {
        if self.json {
            return;
        }
        for (name, value) in [("height", &fields.height), ("weight", &fields.weight)] {
            if let Some(value) = value {
                println!("{} = {}", name, value);
            }
        }
    }
}

/// Apply one command; returns `false` when the session should end
pub fn dispatch<R: Renderer>(
    controller: &mut WidgetController<R>,
    form: &mut FormFields,
    command: Command,
) -> RuntimeResult<bool> {
    match command {
        Command::Set(field, value) => {
            form.set(field, value);
            controller.on_fields(&form.height, &form.weight, &form.age, &form.activity)?;
        }
        Command::Unit(unit) => {
            if let ToggleOutcome::Updated {
                rewritten_fields: Some(fields),
            } = controller.select_unit(unit)?
            {
                form.apply(&fields);
            }
        }
        Command::Gender(gender) => {
            controller.select_gender(gender)?;
        }
        Command::Show => {
            if !controller.flush()? {
                let report = controller.report()?;
                controller.renderer().render(&report);
            }
        }
        Command::Help => println!("{}", HELP),
        Command::Quit => {
            controller.flush()?;
            return Ok(false);
        }
    }
    Ok(true)
}
