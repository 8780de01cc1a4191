//! Hold-out model selection on a synthetic daily series.
//!
//! Run with `RUST_LOG=temporal_split=debug cargo run --example holdout_evaluation`
//! to see the split and scoring logs.

use temporal_split::core::OrderedSeries;
use temporal_split::datasets::{daily_series, DailySeriesConfig};
use temporal_split::evaluation::{fit_all, model_refs, ScoreConfig, ScoreTable};
use temporal_split::models::{BoxedModel, ForecastModel, SeasonalOrder, ARIMA};
use temporal_split::plot::{Chart, PlotlyJsonRenderer, Renderer};
use temporal_split::split::train_val_test_split;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let table = daily_series(&DailySeriesConfig::new(365).with_noise(3.0))?;
    let series = OrderedSeries::from(table);
    println!("Loaded {} daily observations", series.len());

    let split = train_val_test_split(&series, 309, 28)?;
    for segment in split.segments() {
        println!("{:?}: [{}, {})", segment.kind, segment.start, segment.end);
    }

    let mut candidates: Vec<BoxedModel> = vec![
        Box::new(ARIMA::new(1, 1, 0)),
        Box::new(ARIMA::new(1, 1, 1)),
        Box::new(ARIMA::seasonal(1, 0, 0, SeasonalOrder::new(0, 1, 1, 7))),
        Box::new(ARIMA::seasonal(1, 1, 1, SeasonalOrder::new(0, 1, 1, 7))),
    ];
    fit_all(&mut candidates, &split.train)?;

    let config = ScoreConfig::default();
    let selection = ScoreTable::build(&model_refs(&candidates), &split.validation, &config)?;
    println!("\n{}", "=".repeat(40));
    println!("Validation scores");
    println!("{}", "=".repeat(40));
    print!("{}", selection);

    let best = selection.best().ok_or("no model could be scored")?;
    let best_index = selection
        .rows()
        .iter()
        .position(|row| std::ptr::eq(row, best))
        .ok_or("best model missing from table")?;
    let order = candidates[best_index]
        .order()
        .ok_or("selected model has no order")?;
    println!("\nSelected {}", order);

    // Refit on everything before the test segment, then score the test segment once.
    let history = OrderedSeries::concat([&split.train, &split.validation])?;
    let mut chosen = ARIMA::with_order(order);
    chosen.fit(&history)?;

    let finalists: [&dyn ForecastModel; 1] = [&chosen];
    let test_scores = ScoreTable::build(&finalists, &split.test, &config)?;
    println!("\nTest score");
    print!("{}", test_scores);

    let forecast = chosen.predict_with_intervals(split.test.len(), 0.95)?;
    let chart = Chart::new(&history)
        .with_test(&split.test)
        .with_forecast(&forecast)
        .with_y_axis_label("Daily value");
    let figure = PlotlyJsonRenderer::default().render(&chart)?;

    let path = std::env::temp_dir().join("holdout_evaluation.json");
    std::fs::write(&path, serde_json::to_string_pretty(&figure)?)?;
    println!("\nPlotly figure written to {}", path.display());

    Ok(())
}
