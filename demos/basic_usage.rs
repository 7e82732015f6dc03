// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with `--features logging` to see division truncation, root iteration
// and factorial cache events.

use digitwise::prelude::*;

fn main() -> Result<(), NumericError> {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== Digitwise Example ===\n");

    // Canonical digit strings
    let price: Decimal = "0012.3400".parse()?;
    let rate: Decimal = "1.5e-1".parse()?;
    println!("Parsed {} and {}", price, rate);
    println!("  product:  {}", &price * &rate);
    println!("  sum:      {}", &price + &rate);
    println!("  floor(-2.5) = {}", Decimal::parse("-2.5")?.floor());

    // Bounded division through a context
    println!("\n=== Division ===");
    let ctx = MathContext::new(MathConfig::fast())?;
    println!("1 / 7 at 20 digits = {}", ctx.divide("1", "7")?);
    println!("-7 mod 3 = {}", Decimal::from(-7).checked_rem(&Decimal::from(3))?);

    // Roots, powers and logarithms
    println!("\n=== Roots and Logarithms ===");
    println!("sqrt(2)      = {}", ctx.root("2", "2")?);
    println!("cbrt(27)     = {}", ctx.root("27", "3")?);
    println!("8^1.5        = {}", ctx.power("8", "1.5")?.round(10));
    println!("log2(10)     = {}", ctx.log("2", "10")?);
    println!("e^0.5        = {}", exp(&Decimal::parse("0.5")?.with_precision(20))?);

    // Fractions
    println!("\n=== Fractions ===");
    let mut fractions = vec![Fraction::parse("1/6")?, Fraction::parse("3/4")?];
    Fraction::lcd(&mut fractions)?;
    println!("Common denominator: {} and {}", fractions[0], fractions[1]);
    let sum = fractions[0].checked_add(&fractions[1])?.simplified()?;
    println!("Sum: {} = {}", sum, sum.to_decimal()?);

    // Integer algorithms
    println!("\n=== Integer Algorithms ===");
    let operands = [Decimal::from(84), Decimal::from(126)];
    println!("gcf(84, 126) = {}", gcf(&operands)?);
    println!("lcm(84, 126) = {}", lcm(&operands)?);
    for (prime, multiplicity) in prime_factor(&Decimal::from(5040))? {
        println!("  5040 has {}^{}", prime, multiplicity);
    }
    println!("30! = {}", ctx.factorial("30")?);

    // Bases and binary logic
    println!("\n=== Conversion ===");
    let value = Decimal::from(2024);
    println!("2024 in base 16 = {}", to_base(&value, 16)?);
    let bits = to_binary(&value)?;
    println!("2024 in binary  = {}", bits);
    println!("NOT             = {}", !&bits);
    println!("<< 3            = {}", bits.left_shift(3));

    // Random values within bounds
    println!("\n=== Random ===");
    for _ in 0..3 {
        println!("  {}", ctx.random("-10", "10", true)?);
    }

    Ok(())
}
