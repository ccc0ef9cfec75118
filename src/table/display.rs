use super::prelude::*;

const COLUMN_WIDTH: usize = 15;

impl Display for Table {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let rule = format!("|-{}-|", "-".repeat(COLUMN_WIDTH * self.attributes().len()));
        writeln!(f)?;
        writeln!(f, " Table {}", self.name())?;
        writeln!(f, "{}", rule)?;
        write_row(f, self.attributes())?;
        writeln!(f, "{}", rule)?;
        for tuple in self.tuples() {
            write_row(f, tuple)?;
        }
        write!(f, "{}", rule)
    }
}

fn write_row<T: Display>(f: &mut Formatter<'_>, cells: &[T]) -> FmtResult {
    f.write_str("| ")?;
    for cell in cells {
        write!(f, "{:>width$}", cell.to_string(), width = COLUMN_WIDTH)?;
    }
    writeln!(f, " |")
}
