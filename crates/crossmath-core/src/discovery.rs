//! Equation discovery.
//!
//! [`find_equations`] scans every row left to right and every column top to bottom for
//! an equals sign. The scan is driven purely by where the equals sign sits, so grids of
//! any size and chains of any length are handled the same way.
//!
//! For a line with its first equals sign at index `e`:
//!
//! - `e` must be at least 2 and must not be the last index; otherwise the line holds no
//!   equation;
//! - operands are the cells at even indices before `e` (`0, 2, 4, …`);
//! - operators are the cells at odd indices before `e`, in order;
//! - the result is the cell at `e + 1`.
//!
//! A line is skipped when it yields fewer than two operands, when the operator count
//! does not match (an equals sign at an even index), or when an odd-index cell before
//! the equals sign is not an operator. Skipped lines are not errors.

use log::{debug, trace};

use crate::{Cell, Equation, EquationSet, Grid, Operator, Orientation};

/// Derives the complete, deduplicated set of equations of `grid`.
///
/// Horizontal equations come first (top row to bottom row), followed by vertical ones
/// (left column to right column). Should two equations share a key, the first is kept.
///
/// # Examples
///
/// ```
/// use crossmath_core::{Grid, Operator, Position, find_equations};
///
/// let grid: Grid = "_ / 2 + 3 = 7".parse()?;
/// let equations = find_equations(&grid);
/// assert_eq!(equations.len(), 1);
///
/// let eq = equations.iter().next().unwrap();
/// assert_eq!(eq.operands().len(), 3);
/// assert_eq!(eq.operators(), &[Operator::Div, Operator::Add]);
/// assert_eq!(eq.result(), Position::new(0, 6));
/// # Ok::<(), crossmath_core::GridParseError>(())
/// ```
#[must_use]
pub fn find_equations(grid: &Grid) -> EquationSet {
    let mut equations = EquationSet::new();

    for row in 0..grid.rows() {
        if let Some(eq) = scan_line(Orientation::Horizontal, row, grid.row(row)) {
            insert(&mut equations, eq);
        }
    }
    for col in 0..grid.cols() {
        let cells: Vec<Cell> = grid.column(col).copied().collect();
        if let Some(eq) = scan_line(Orientation::Vertical, col, &cells) {
            insert(&mut equations, eq);
        }
    }

    debug!(
        "discovered {} equations in {}x{} grid",
        equations.len(),
        grid.rows(),
        grid.cols()
    );
    equations
}

fn insert(equations: &mut EquationSet, eq: Equation) {
    let key = eq.key();
    if !equations.insert(eq) {
        debug!("duplicate equation key {key}, keeping the first");
    }
}

fn scan_line(orientation: Orientation, line: usize, cells: &[Cell]) -> Option<Equation> {
    let tag = orientation.tag();
    let Some(equals) = cells.iter().position(|cell| cell.is_equals()) else {
        trace!("{tag}{line}: no equals sign");
        return None;
    };
    if equals < 2 || equals + 1 >= cells.len() {
        trace!("{tag}{line}: equals sign at {equals} leaves no room for operands and result");
        return None;
    }

    let prefix = &cells[..equals];
    let operands = (0..equals)
        .step_by(2)
        .map(|offset| orientation.position(line, offset))
        .collect();
    let operators = prefix
        .iter()
        .skip(1)
        .step_by(2)
        .map(|cell| cell.operator())
        .collect::<Option<Vec<Operator>>>();
    let Some(operators) = operators else {
        trace!("{tag}{line}: non-operator cell between operands");
        return None;
    };
    let result = orientation.position(line, equals + 1);

    let eq = Equation::new(orientation, operands, operators, result);
    match &eq {
        Some(eq) => trace!("{tag}{line}: {eq}"),
        None => trace!("{tag}{line}: equals sign at {equals} yields no valid equation"),
    }
    eq
}
