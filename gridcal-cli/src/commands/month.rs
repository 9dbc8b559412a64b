use anyhow::Result;
use gridcal_core::month::MonthCursor;

use crate::context::AppContext;
use crate::render::render_month;

/// Net number of months to move for `--next` and `--prev`.
pub fn offset(prev: u32, next: u32) -> i64 {
    i64::from(next) - i64::from(prev)
}

pub async fn run(ctx: &AppContext, month: Option<MonthCursor>, offset: i64) -> Result<()> {
    let mut controller = ctx.controller().await?;

    if let Some(month) = month {
        controller.go_to(month);
    }
    if offset != 0 {
        controller.go_to(controller.cursor().shift(offset)?);
    }

    let cells = controller.grid()?;
    println!(
        "{}",
        render_month(&controller.title(), &cells, |d| controller.events_for(d))
    );

    Ok(())
}
