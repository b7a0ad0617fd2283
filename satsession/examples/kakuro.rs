use itertools::Itertools;
use log::info;
use satsession::{Literal, Session, Variable};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;

// `down\across` clue cells and `.` blanks; `**` is a missing sum.
const PUZZLE: &str = r"
**\**  23\**  30\**  **\**  **\**  27\**  12\**  16\**
**\16    .      .    **\**  17\24    .      .      .
**\17    .      .    15\29    .      .      .      .
**\35    .      .      .      .      .    12\**  **\**
**\**  **\7     .      .     7\8     .      .     7\**
**\**  11\**  10\16    .      .      .      .      .
**\21    .      .      .      .    **\5     .      .
**\6     .      .      .    **\**  **\3     .      .
";

/// `(down, across)` sums of a clue cell, `None` for a blank.
type Field = Vec<Vec<Option<(usize, usize)>>>;

/// Nine digit variables per blank cell, none for clue cells.
type Cells<'s> = Vec<Vec<Vec<Variable<'s>>>>;

fn parse(text: &str) -> Result<Field, Box<dyn Error>> {
    let sum = |s: &str| -> Result<usize, Box<dyn Error>> {
        Ok(if s == "**" { 0 } else { s.parse()? })
    };
    let mut field = Vec::new();
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        let mut row = Vec::new();
        for token in line.split_whitespace() {
            row.push(match token.split_once('\\') {
                Some((down, across)) => Some((sum(down)?, sum(across)?)),
                None if token == "." => None,
                None => return Err(format!("bad cell {:?}", token).into()),
            });
        }
        field.push(row);
    }
    Ok(field)
}

fn define<'s>(solver: &'s Session, field: &Field) -> Result<Cells<'s>, Box<dyn Error>> {
    let mut cells: Cells<'s> = Vec::new();
    for row in field {
        let mut line = Vec::new();
        for cell in row {
            let mut digits = Vec::new();
            if cell.is_none() {
                for _ in 0..9 {
                    digits.push(solver.new_var()?);
                }
                // exactly one digit
                solver.add_clause(digits.iter().copied())?;
                for (d1, d2) in digits.iter().tuple_combinations() {
                    solver.add_clause([-*d1, -*d2])?;
                }
            }
            line.push(digits);
        }
        cells.push(line);
    }

    let height = field.len();
    let width = field.iter().map(|r| r.len()).max().unwrap_or(0);
    let rows = (0..height)
        .map(|r| (0..field[r].len()).map(|c| (r, c)).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let columns = (0..width)
        .map(|c| {
            (0..height)
                .filter(|&r| c < field[r].len())
                .map(|r| (r, c))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    define_entries(solver, field, &cells, &rows, |(_, across)| across)?;
    define_entries(solver, field, &cells, &columns, |(down, _)| down)?;
    Ok(cells)
}

/// Split each line into runs of blanks, each headed by the clue cell before it.
fn define_entries(
    solver: &Session,
    field: &Field,
    cells: &Cells,
    lines: &[Vec<(usize, usize)>],
    sum: impl Fn((usize, usize)) -> usize,
) -> Result<(), Box<dyn Error>> {
    for line in lines {
        let mut num = None;
        let mut run: Vec<&[Variable]> = Vec::new();
        for &(r, c) in line {
            match field[r][c] {
                Some(clue) => {
                    define_entry(solver, num, &run)?;
                    num = Some(sum(clue));
                    run.clear();
                }
                None => run.push(&cells[r][c]),
            }
        }
        define_entry(solver, num, &run)?;
    }
    Ok(())
}

/// Distinct digits in `run` adding up to `num`. For every feasible prefix of
/// digits, the next cell must take one of the digits that can follow it.
fn define_entry(
    solver: &Session,
    num: Option<usize>,
    run: &[&[Variable]],
) -> Result<(), Box<dyn Error>> {
    let num = match num {
        Some(num) if !run.is_empty() => num,
        _ => return Ok(()),
    };

    let mut next: BTreeMap<Vec<usize>, BTreeSet<usize>> = BTreeMap::new();
    for combination in (1..=9).combinations(run.len()) {
        if combination.iter().sum::<usize>() != num {
            continue;
        }
        for digits in combination.into_iter().permutations(run.len()) {
            for n in 0..digits.len() {
                next.entry(digits[..n].to_vec()).or_default().insert(digits[n]);
            }
        }
    }
    if next.is_empty() {
        return Err(format!(
            "bad field: no {} distinct digits add up to {}",
            run.len(),
            num
        )
        .into());
    }

    for (prefix, digits) in next {
        let clause = prefix
            .iter()
            .zip(run)
            .map(|(&d, cell)| -cell[d - 1])
            .chain(digits.iter().map(|&d| run[prefix.len()][d - 1].positive()))
            .collect::<Vec<Literal>>();
        solver.add_clause(clause)?;
    }
    Ok(())
}

fn solution(cells: &Cells) -> satsession::Result<Vec<Vec<Option<usize>>>> {
    let mut field = Vec::new();
    for line in cells {
        let mut row = Vec::new();
        for digits in line {
            let mut value = None;
            for (d, v) in digits.iter().enumerate() {
                if v.value()? {
                    value = Some(d + 1);
                }
            }
            row.push(value);
        }
        field.push(row);
    }
    Ok(field)
}

fn print_field(field: &Field, solution: &[Vec<Option<usize>>]) {
    let sum = |n: usize| if n == 0 { "##".to_string() } else { format!("{:02}", n) };
    for (clues, digits) in field.iter().zip(solution) {
        let line = clues
            .iter()
            .zip(digits)
            .map(|(clue, digit)| match (clue, digit) {
                (Some((down, across)), _) => format!("{}\\{}", sum(*down), sum(*across)),
                (None, Some(d)) => format!("{:^5}", d),
                (None, None) => format!("{:^5}", "?"),
            })
            .join(" ");
        println!("{}", line);
    }
}

fn solve(solver: &Session) -> satsession::Result<bool> {
    let start = cpu_time::ProcessTime::now();
    let result = solver.solve()?;
    info!(
        "time: {:?}",
        cpu_time::ProcessTime::now().duration_since(start)
    );
    Ok(result)
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::init_with_level(log::Level::Info).unwrap();
    let field = parse(PUZZLE)?;

    let solver = Session::new();
    let cells = define(&solver, &field)?;
    info!("variables: {}", solver.num_vars());
    info!("clauses: {}", solver.num_clauses());

    let solvable = solve(&solver)?;
    println!("result: {}", if solvable { "solvable" } else { "unsolvable" });
    if !solvable {
        return Ok(());
    }
    println!("solution found:");
    print_field(&field, &solution(&cells)?);

    // forbid this exact assignment and look for another one
    let mut blocking = Vec::new();
    for v in cells.iter().flatten().flatten() {
        blocking.push(if v.value()? { -*v } else { v.positive() });
    }
    solver.add_clause(blocking)?;

    let another = solve(&solver)?;
    println!(
        "result: {}",
        if another {
            "different solution found"
        } else {
            "different solution not found"
        }
    );
    if another {
        println!("different solution:");
        print_field(&field, &solution(&cells)?);
    }
    Ok(())
}
