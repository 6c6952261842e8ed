use anyhow::Result;

use crate::{
    components::Employee, engine::System, enclosure::Enclosure, report::DayReport,
    rng::RandomSource, world::Zoo,
};

/// Pays every salary and rebuilds the care tallies.
pub struct PayrollSystem;

impl PayrollSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PayrollSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Greedy capacity tally. Animals are not consumed, so the same enclosure can
/// count towards several employees. An employee filling up mid-enclosure ends
/// that enclosure's pass.
pub fn tally_assignments(employees: &mut [Employee], enclosures: &[Enclosure]) {
    for employee in employees.iter_mut() {
        employee.current_animals = 0;
    }
    for enclosure in enclosures {
        let resident = enclosure.len() as u32;
        for employee in employees.iter_mut() {
            if employee.current_animals < employee.max_animals {
                employee.current_animals += employee.spare_capacity().min(resident);
                if employee.current_animals >= employee.max_animals {
                    break;
                }
            }
        }
    }
}

impl System for PayrollSystem {
    fn name(&self) -> &str {
        "payroll"
    }

    fn run(&mut self, report: &mut DayReport, zoo: &mut Zoo, _rng: &mut dyn RandomSource) -> Result<()> {
        let payroll: i64 = zoo.employees.iter().map(|employee| employee.salary).sum();
        zoo.money -= payroll;
        report.payroll = payroll;
        tally_assignments(&mut zoo.employees, &zoo.enclosures);
        Ok(())
    }
}
