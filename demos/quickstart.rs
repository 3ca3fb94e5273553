use civiltick::{Duration, TimeContext, TimeOfDay};

fn main() -> Result<(), civiltick::TimeError> {
    let ctx = TimeContext::from_timezone_name("Europe/Madrid")?;

    let now = ctx.now()?;
    let renewal = now.add_months(1)?;
    let opening = TimeOfDay::parse("9:30 AM")?;

    println!("Now:      {now}");
    println!("UTC:      {}", now.to_gmt()?);
    println!("Renewal:  {}", renewal.to_sql_date());
    println!("Until:    {}", renewal.subtract(&now).to_human_string());
    println!("Opening:  {opening}");
    println!("Grace:    {}", Duration::from_components(0, 1, 30, 0)?);
    Ok(())
}
