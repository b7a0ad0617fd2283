use itertools::{iproduct, Itertools};
use log::info;
use satsession::{Literal, Session, Variable};

const PUZZLE: &str = "
5 3 0 0 7 0 0 0 0
6 0 0 1 9 5 0 0 0
0 9 8 0 0 0 0 6 0
8 0 0 0 6 0 0 0 3
4 0 0 8 0 3 0 0 1
7 0 0 0 2 0 0 0 6
0 6 0 0 0 0 2 8 0
0 0 0 4 1 9 0 0 5
0 0 0 0 8 0 0 7 9
";

const N: usize = 9;
const BOX: usize = 3;

fn parse(text: &str) -> Vec<Vec<usize>> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.split_whitespace().map(|n| n.parse().unwrap()).collect())
        .collect()
}

type Grid<'s> = Vec<Vec<Vec<Variable<'s>>>>;

/// One variable per (row, column, digit), with the basic rules and the
/// redundant ones that speed up the search.
fn define<'s>(solver: &'s Session) -> satsession::Result<Grid<'s>> {
    let mut vars: Grid<'s> = Vec::with_capacity(N);
    for _ in 0..N {
        let mut plane = Vec::with_capacity(N);
        for _ in 0..N {
            plane.push((0..N).map(|_| solver.new_var()).collect::<satsession::Result<Vec<_>>>()?);
        }
        vars.push(plane);
    }

    for (x, y) in iproduct!(0..N, 0..N) {
        // at least one digit per cell
        solver.add_clause((0..N).map(|z| vars[x][y][z]))?;
        // at most one digit per cell
        for (z1, z2) in (0..N).tuple_combinations() {
            solver.add_clause([-vars[x][y][z1], -vars[x][y][z2]])?;
        }
    }

    for (z, i) in iproduct!(0..N, 0..N) {
        for (j, k) in (0..N).tuple_combinations() {
            // each digit at most once per column and per row
            solver.add_clause([-vars[j][i][z], -vars[k][i][z]])?;
            solver.add_clause([-vars[i][j][z], -vars[i][k][z]])?;
        }
        // and at least once
        solver.add_clause((0..N).map(|j| vars[j][i][z]))?;
        solver.add_clause((0..N).map(|j| vars[i][j][z]))?;
    }

    let offsets = iproduct!(0..BOX, 0..BOX).collect::<Vec<_>>();
    for (z, xg, yg) in iproduct!(0..N, (0..N).step_by(BOX), (0..N).step_by(BOX)) {
        for ((xo1, yo1), (xo2, yo2)) in offsets.iter().tuple_combinations() {
            solver.add_clause([
                -vars[xg + xo1][yg + yo1][z],
                -vars[xg + xo2][yg + yo2][z],
            ])?;
        }
        solver.add_clause(offsets.iter().map(|(xo, yo)| vars[xg + xo][yg + yo][z]))?;
    }

    Ok(vars)
}

/// Fixed cells become assumptions, so the same formula can be reused.
fn assumptions<'s>(vars: &Grid<'s>, field: &[Vec<usize>]) -> Vec<Literal<'s>> {
    let mut lits = Vec::new();
    for (y, row) in field.iter().enumerate() {
        for (x, &n) in row.iter().enumerate().filter(|(_, n)| **n != 0) {
            for z in 0..N {
                let v = vars[x][y][z];
                lits.push(if z == n - 1 { v.positive() } else { -v });
            }
        }
    }
    lits
}

fn solution(vars: &Grid) -> satsession::Result<Vec<Vec<usize>>> {
    let mut field = vec![vec![0; N]; N];
    for (x, y, z) in iproduct!(0..N, 0..N, 0..N) {
        if vars[x][y][z].value()? {
            field[y][x] = z + 1;
        }
    }
    Ok(field)
}

fn print_field(field: &[Vec<usize>]) {
    for row in field {
        let cells = row
            .iter()
            .map(|&c| if c == 0 { ".".to_string() } else { c.to_string() })
            .join(" ");
        println!("  {}", cells);
    }
}

fn main() -> satsession::Result<()> {
    simple_logger::init_with_level(log::Level::Info).unwrap();
    let field = parse(PUZZLE);
    println!("problem:");
    print_field(&field);

    let solver = Session::new();
    let vars = define(&solver)?;
    info!("variables: {}", solver.num_vars());
    info!("clauses: {}", solver.num_clauses());

    let assumps = assumptions(&vars, &field);
    info!("assumptions: {}", assumps.len());

    let start = cpu_time::ProcessTime::now();
    let solvable = solver.solve_with(assumps.iter().copied())?;
    info!(
        "time: {:?}",
        cpu_time::ProcessTime::now().duration_since(start)
    );
    println!("result: {}", if solvable { "solvable" } else { "unsolvable" });
    if !solvable {
        return Ok(());
    }

    let first = solution(&vars)?;
    println!("solution found:");
    print_field(&first);

    // forbid this exact solution and look for another one
    let blocking = iproduct!(0..N, 0..N, 0..N)
        .map(|(x, y, z)| -> satsession::Result<Literal> {
            let v = vars[x][y][z];
            Ok(if v.value()? { -v } else { v.positive() })
        })
        .collect::<satsession::Result<Vec<_>>>()?;
    solver.add_clause(blocking)?;

    let another = solver.solve_with(assumps.iter().copied())?;
    println!(
        "result: {}",
        if another {
            "different solution found"
        } else {
            "different solution not found"
        }
    );
    if another {
        print_field(&solution(&vars)?);
    }
    Ok(())
}
