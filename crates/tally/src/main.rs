use tally_app::calculator::Calculator;

fn main() {
    Calculator::new().run();
}
