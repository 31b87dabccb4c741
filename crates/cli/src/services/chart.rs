use common::models::SeriesRow;

pub const DEFAULT_WIDTH: usize = 72;
pub const DEFAULT_HEIGHT: usize = 16;

const CLOSE: char = 'C';
const SMA: char = 'S';
const EMA: char = 'E';

/// Plots Close/SMA/EMA on a character grid. Later layers overwrite earlier
/// ones, so close prices stay visible where lines cross.
pub fn render(rows: &[SeriesRow], width: usize, height: usize) -> String {
    if rows.is_empty() {
        return "(no rows to chart)\n".to_string();
    }
    let width = width.max(2);
    let height = height.max(2);

    let values = rows
        .iter()
        .flat_map(|row| [Some(row.close), row.sma, row.ema])
        .flatten()
        .filter(|v| v.is_finite());
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() {
        return "(no rows to chart)\n".to_string();
    }
    if hi - lo < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }

    let mut grid = vec![vec![' '; width]; height];
    let last = rows.len() - 1;
    let column = |i: usize| if last == 0 { 0 } else { i * (width - 1) / last };
    let line = |v: f64| {
        let level = ((v - lo) / (hi - lo) * (height - 1) as f64).round() as usize;
        height - 1 - level.min(height - 1)
    };

    let layers: [(char, fn(&SeriesRow) -> Option<f64>); 3] = [
        (EMA, |row| row.ema),
        (SMA, |row| row.sma),
        (CLOSE, |row| Some(row.close)),
    ];
    for (glyph, pick) in layers {
        for (i, row) in rows.iter().enumerate() {
            if let Some(v) = pick(row).filter(|v| v.is_finite()) {
                grid[line(v)][column(i)] = glyph;
            }
        }
    }

    let top = format_axis(hi);
    let bottom = format_axis(lo);
    let label_width = top.len().max(bottom.len());

    let mut out = String::new();
    for (r, cells) in grid.iter().enumerate() {
        let label = match r {
            0 => top.as_str(),
            r if r == height - 1 => bottom.as_str(),
            _ => "",
        };
        let cells: String = cells.iter().collect();
        out.push_str(&format!("{label:>label_width$} |{}\n", cells.trim_end()));
    }
    out.push_str(&format!("{:>label_width$} +{}\n", "", "-".repeat(width)));

    let first_ts = rows[0].timestamp.format("%Y-%m-%d %H:%M").to_string();
    let last_ts = rows[last].timestamp.format("%Y-%m-%d %H:%M").to_string();
    let gap = width.saturating_sub(first_ts.len() + last_ts.len()).max(1);
    out.push_str(&format!(
        "{:>label_width$}  {first_ts}{}{last_ts}\n",
        "",
        " ".repeat(gap)
    ));
    out.push_str(&format!(
        "{:>label_width$}  {CLOSE} Close   {SMA} SMA   {EMA} EMA\n",
        ""
    ));
    out
}

fn format_axis(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{value:.2}")
    } else {
        format!("{value:.5}")
    }
}
