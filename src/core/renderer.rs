//! Line chart rendering for the edit-count table.

use crate::domain::model::{ChartSettings, EditCountTable};
use crate::utils::error::{Result, TrendError};
use chrono::NaiveDate;
use plotters::prelude::*;
use std::ops::Range;

const LINE_COLOR: RGBColor = RGBColor(70, 130, 180);
const X_LABEL_COUNT: usize = 8;

fn draw_err<E>(e: DrawingAreaErrorKind<E>) -> TrendError
where
    E: std::error::Error + Send + Sync,
{
    TrendError::render(e.to_string())
}

#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    settings: ChartSettings,
}

impl ChartRenderer {
    pub fn new(settings: ChartSettings) -> Self {
        Self { settings }
    }

    /// 時間軸範圍：最早到最晚的日期
    ///
    /// 單日時往後延一天，空表則以 1970-01-01 起的一天作為退化軸。
    fn x_domain(table: &EditCountTable) -> Range<NaiveDate> {
        match (table.first_day(), table.last_day()) {
            (Some(first), Some(last)) if first < last => first..last,
            (Some(day), _) => match day.succ_opt() {
                Some(next) => day..next,
                None => day.pred_opt().unwrap_or(day)..day,
            },
            _ => {
                let epoch = NaiveDate::default();
                epoch..epoch.succ_opt().unwrap_or(epoch)
            }
        }
    }

    /// 線性軸從 0 到最大值，至少為 1
    fn y_domain(table: &EditCountTable) -> Range<u32> {
        0..table.max_count().unwrap_or(0).max(1)
    }

    pub fn render_svg(&self, table: &EditCountTable) -> Result<String> {
        let ChartSettings {
            width,
            height,
            margins,
        } = self.settings;

        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            let mut chart = ChartBuilder::on(&root)
                .margin_top(margins.top)
                .margin_right(margins.right)
                .x_label_area_size(margins.bottom)
                .y_label_area_size(margins.left)
                .build_cartesian_2d(Self::x_domain(table), Self::y_domain(table))
                .map_err(draw_err)?;

            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(X_LABEL_COUNT)
                .x_label_formatter(&|day: &NaiveDate| day.format("%Y-%m-%d").to_string())
                .draw()
                .map_err(draw_err)?;

            if !table.is_empty() {
                chart
                    .draw_series(LineSeries::new(
                        table.entries().iter().map(|entry| (entry.day, entry.count)),
                        LINE_COLOR.stroke_width(2),
                    ))
                    .map_err(draw_err)?;
            } else {
                tracing::warn!("No edits to plot, rendering empty chart");
            }

            root.present().map_err(draw_err)?;
        }

        tracing::debug!(
            "Rendered {}x{} chart with {} points ({} bytes)",
            width,
            height,
            table.len(),
            svg.len()
        );
        Ok(svg)
    }

    /// `day,count` 表格，空表只輸出標題列
    pub fn render_csv(&self, table: &EditCountTable) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer.write_record(["day", "count"])?;
        for entry in table.entries() {
            writer.serialize(entry)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| TrendError::Io(e.into_error()))?;
        String::from_utf8(bytes).map_err(|e| TrendError::render(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aggregator::aggregate_by_day;
    use crate::domain::model::Margins;
    use chrono::{DateTime, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn sample_table() -> EditCountTable {
        aggregate_by_day(
            [
                "2023-01-01T10:00:00Z",
                "2023-01-01T23:00:00Z",
                "2023-01-02T01:00:00Z",
                "2023-01-05T12:00:00Z",
            ]
            .iter()
            .map(|s| ts(s)),
        )
    }

    fn line_count(svg: &str) -> usize {
        svg.to_lowercase().matches("#4682b4").count()
    }

    /// 取出所有 `<text>` 元素的文字內容
    fn text_labels(svg: &str) -> Vec<String> {
        svg.split("</text>")
            .filter(|chunk| chunk.contains("<text"))
            .filter_map(|chunk| chunk.rsplit('>').next())
            .map(|label| label.trim().to_string())
            .collect()
    }

    #[test]
    fn test_x_domain_spans_min_to_max_day() {
        let domain = ChartRenderer::x_domain(&sample_table());
        assert_eq!(domain.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(domain.end, NaiveDate::from_ymd_opt(2023, 1, 5).unwrap());
    }

    #[test]
    fn test_x_domain_single_day_is_widened() {
        let table = aggregate_by_day([ts("2023-01-01T10:00:00Z")]);
        let domain = ChartRenderer::x_domain(&table);
        assert_eq!(domain.start, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(domain.end, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    }

    #[test]
    fn test_y_domain_starts_at_zero() {
        assert_eq!(ChartRenderer::y_domain(&sample_table()), 0..2);
        assert_eq!(ChartRenderer::y_domain(&EditCountTable::default()), 0..1);
    }

    #[test]
    fn test_render_svg_has_configured_size_and_one_line() {
        let renderer = ChartRenderer::default();
        let svg = renderer.render_svg(&sample_table()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("width=\"960\""));
        assert!(svg.contains("height=\"500\""));
        assert!(svg.contains("<text"));
        assert_eq!(line_count(&svg), 1);
    }

    #[test]
    fn test_render_svg_empty_table_draws_axes_only() {
        let renderer = ChartRenderer::default();
        let svg = renderer.render_svg(&EditCountTable::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("<text"));
        assert_eq!(line_count(&svg), 0);

        let labels = text_labels(&svg);
        assert!(labels.iter().any(|l| l.starts_with("1970-01-")));
        assert!(labels.iter().any(|l| l == "0"));
    }

    #[test]
    fn test_render_svg_draws_both_axes() {
        let renderer = ChartRenderer::default();
        let svg = renderer.render_svg(&sample_table()).unwrap();
        let labels = text_labels(&svg);

        // 底部日期刻度
        let day_labels: Vec<&String> = labels
            .iter()
            .filter(|l| NaiveDate::parse_from_str(l, "%Y-%m-%d").is_ok())
            .collect();
        assert!(day_labels.len() >= 2);
        assert!(day_labels.iter().all(|l| l.starts_with("2023-01-0")));

        // 左側計數刻度從 0 起
        let count_labels: Vec<u32> = labels.iter().filter_map(|l| l.parse().ok()).collect();
        assert!(count_labels.contains(&0));
        assert!(count_labels.iter().all(|c| *c <= 2));

        // 資料線加上兩條軸線
        assert!(svg.matches("<polyline").count() >= 3);
    }

    #[test]
    fn test_render_svg_custom_size() {
        let renderer = ChartRenderer::new(ChartSettings {
            width: 640,
            height: 320,
            margins: Margins {
                top: 10,
                right: 10,
                bottom: 40,
                left: 60,
            },
        });
        let svg = renderer.render_svg(&sample_table()).unwrap();

        assert!(svg.contains("width=\"640\""));
        assert!(svg.contains("height=\"320\""));
    }

    #[test]
    fn test_render_csv() {
        let renderer = ChartRenderer::default();
        let csv = renderer.render_csv(&sample_table()).unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["day,count", "2023-01-01,2", "2023-01-02,1", "2023-01-05,1"]);
    }

    #[test]
    fn test_render_csv_empty_table_has_header_only() {
        let csv = ChartRenderer::default()
            .render_csv(&EditCountTable::default())
            .unwrap();
        assert_eq!(csv.trim_end(), "day,count");
    }
}
