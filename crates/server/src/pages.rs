//! Server-rendered HTML pages

use std::fmt::Write;

use axum::http::StatusCode;
use data_facade::{DatasetEntry, Frame};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use report::{ForecastReport, DATE_FORMAT};
use var_facade::VarConfig;

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2em auto;padding:0 1em}\
table{border-collapse:collapse}td,th{border:1px solid #ccc;padding:2px 8px;text-align:right}\
.scroll{max-height:24em;overflow:auto}hr{margin:2em 0}.error{color:#b00020}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{}</style></head><body>{}</body></html>\n",
        text(title),
        STYLE,
        body
    )
}

/// Dataset choice form. `entries` pairs each built-in dataset with whether
/// its file is present; missing ones stay selectable and fail on submit.
pub fn form_page(entries: &[(DatasetEntry, bool)], config: &VarConfig) -> String {
    let mut options = String::new();
    for (entry, available) in entries {
        let _ = write!(
            options,
            "<option value=\"{}\">{}{}</option>",
            attr(&entry.key),
            text(&entry.label),
            if *available { "" } else { " (missing)" }
        );
    }

    let body = format!(
        "<h1>FAB CCI forecast (VAR model)</h1>\
         <form method=\"post\" action=\"/forecast\" enctype=\"multipart/form-data\">\
         <p><label><input type=\"radio\" name=\"source\" value=\"builtin\" checked> Built-in dataset</label> \
         <label><input type=\"radio\" name=\"source\" value=\"upload\"> Upload CSV</label></p>\
         <p><select name=\"dataset\">{}</select></p>\
         <p><input type=\"file\" name=\"file\" accept=\".csv,text/csv\"></p>\
         <p><button type=\"submit\">Forecast</button></p>\
         </form>\
         <p>Lag order chosen by {} up to {} lags; {} months forecast.</p>",
        options, config.criterion, config.max_lags, config.steps
    );
    layout("CCI forecast", &body)
}

fn frame_table(frame: &Frame) -> String {
    let mut html = String::from("<div class=\"scroll\"><table><tr><th>date</th>");
    for column in frame.columns() {
        let _ = write!(html, "<th>{}</th>", text(column));
    }
    html.push_str("</tr>");
    for (date, row) in frame.dates().iter().zip(frame.values()) {
        let _ = write!(html, "<tr><td>{}</td>", date.format(DATE_FORMAT));
        for value in row {
            let _ = write!(html, "<td>{}</td>", value);
        }
        html.push_str("</tr>");
    }
    html.push_str("</table></div>");
    html
}

fn forecast_table(report: &ForecastReport) -> String {
    let mut html = format!(
        "<table><tr><th>date</th><th>{}</th><th>lower</th><th>upper</th></tr>",
        text(&report.target)
    );
    for point in &report.forecast {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{:.4}</td><td>{:.4}</td><td>{:.4}</td></tr>",
            point.date.format(DATE_FORMAT),
            point.value,
            point.lower,
            point.upper
        );
    }
    html.push_str("</table>");
    html
}

/// Input data, chosen lag, forecast table, chart and download link.
pub fn result_page(frame: &Frame, report: &ForecastReport, svg: &str, download: &str) -> String {
    let mut body = format!(
        "<h1>FAB CCI forecast (VAR model)</h1><h2>{}</h2><h3>Data used</h3>{}<hr>\
         <p>Optimal lag ({}): <strong>{}</strong></p>",
        text(&report.dataset_label),
        frame_table(frame),
        report.criterion,
        report.lag_order
    );
    if !report.stable {
        body.push_str("<p class=\"error\">The fitted VAR is not stable; long-horizon forecasts diverge.</p>");
    }
    let _ = write!(
        body,
        "<hr><h3>Forecast</h3>{}<hr>{}<hr>\
         <p><a href=\"{}\" download=\"forecast.csv\">Download forecast (.csv)</a></p>\
         <p><a href=\"/\">New forecast</a></p>",
        forecast_table(report),
        svg,
        attr(download)
    );
    layout("CCI forecast result", &body)
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1><p class=\"error\">{}</p><p><a href=\"/\">Back</a></p>",
        status,
        text(message)
    );
    layout("CCI forecast error", &body)
}
