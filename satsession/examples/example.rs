use satsession::Session;

fn main() -> satsession::Result<()> {
    simple_logger::init_with_level(log::Level::Info).unwrap();
    let solver = Session::new();

    let a = solver.new_var()?;
    let b = solver.new_var()?;

    // (a or b) and (not a or b) and (a or not b)
    (&solver << [a, b])?;
    (&solver << [-a, b.positive()])?;
    (&solver << [a.positive(), -b])?;

    println!("solve: (a or b) and (not a or b) and (a or not b)");
    solver.solve()?;

    println!("result: {}", if solver.is_satisfied() { "SAT" } else { "UNSAT" });
    if solver.is_satisfied() {
        println!("a = {}", solver.value_of(a)?);
        println!("b = {}", solver.value_of(b)?);
    }
    Ok(())
}
