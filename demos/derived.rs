use argplan::{derive::*, prelude::*};

/// Sum up some fruit.
///
/// Args:
///     apples: how many apples to count
///     bananas: how many bananas to count
///     label: what to call the total
///     verbose: describe the counting
#[derive(Debug, Command)]
#[command(program = "derived")]
struct FruitBasket {
    apples: u32,
    #[command(default = 2)]
    bananas: u32,
    label: Option<String>,
    #[command(default = false)]
    verbose: bool,
}

fn main() {
    let basket = FruitBasket::parse();

    if basket.verbose {
        println!("{basket:?}");
    }

    let total = basket.apples + basket.bananas;

    match basket.label {
        Some(label) => println!("{label}: {total}"),
        None => println!("{total}"),
    }
}
