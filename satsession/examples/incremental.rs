use satsession::{Session, Variable};

fn report(solver: &Session, a: Variable, b: Variable) -> satsession::Result<()> {
    println!("result: {}", if solver.is_satisfied() { "SAT" } else { "UNSAT" });
    if solver.is_satisfied() {
        println!("a = {}", a.value()?);
        println!("b = {}", b.value()?);
    }
    println!();
    Ok(())
}

fn main() -> satsession::Result<()> {
    simple_logger::init_with_level(log::Level::Debug).unwrap();
    let solver = Session::new();

    let a = solver.new_var()?;
    let b = solver.new_var()?;

    (&solver << [a, b])?;
    (&solver << [-a, b.positive()])?;
    (&solver << [a.positive(), -b])?;

    println!("{:?}", solver);
    println!("solve: (a or b) and (not a or b) and (a or not b)");
    solver.solve()?;
    println!("{:?}", solver);
    report(&solver, a, b)?;

    println!("solve: (a or b) and (not a or b) and (a or not b)");
    println!("assumption: a = false");
    solver.solve_with([-a])?;
    println!("{:?}", solver);
    report(&solver, a, b)?;

    // ... and (not a or not b)
    (&solver << [-a, -b])?;
    println!("{:?}", solver);

    println!("solve: (a or b) and (not a or b) and (a or not b) and (not a or not b)");
    match solver.solve() {
        Ok(_) => report(&solver, a, b)?,
        Err(e) => println!("result: {} ({})", solver, e),
    }
    Ok(())
}
