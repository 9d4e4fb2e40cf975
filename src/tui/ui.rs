use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders, List, ListItem, Paragraph,
    },
    Frame,
};

use super::app::App;
use crate::map::Bounds;
use crate::view::{camera_caption, CountryRow, FooterView, MarkerView, Stat, APP_TITLE};

const KEY_HINTS: &str = "←↑→↓ pan · +/- zoom · [ ] rotate · < > tilt · Tab select · Enter expand · j/k scroll · q quit";

/// Screen areas of the four regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub list: Rect,
    pub map: Rect,
    pub footer: Rect,
}

/// Header on top; country list on the left; map over the footer on the right
pub fn layout(area: Rect) -> Areas {
    let [header, body] = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);
    let [list, right] =
        Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)]).areas(body);
    let [map, footer] = Layout::vertical([Constraint::Min(0), Constraint::Length(4)]).areas(right);

    Areas {
        header,
        list,
        map,
        footer,
    }
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = layout(frame.area());

    render_header(frame, areas.header);
    render_country_list(frame, app, areas.list);
    render_map(frame, app, areas.map);
    render_footer(frame, app, areas.footer);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            APP_TITLE,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_country_list(frame: &mut Frame, app: &App, area: Rect) {
    let rows = CountryRow::rows(&app.dashboard.state().countries);
    let items: Vec<ListItem> = rows.iter().map(country_item).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    format!(" Countries ({}) ", rows.len()),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        )
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▌");

    let mut state = app.countries.clone();
    frame.render_stateful_widget(list, area, &mut state);
}

fn country_item(row: &CountryRow) -> ListItem<'static> {
    let today_style = if row.today.highlighted {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    ListItem::new(vec![
        Line::from(Span::styled(
            row.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        labelled(CountryRow::TODAY_LABEL, Span::styled(row.today.text.clone(), today_style)),
        labelled(CountryRow::CASES_LABEL, Span::raw(row.cases.clone())),
        labelled(CountryRow::DEATHS_LABEL, Span::raw(row.deaths.clone())),
        labelled(CountryRow::RECOVERED_LABEL, Span::raw(row.recovered.clone())),
        Line::default(),
    ])
}

fn labelled(label: &'static str, value: Span<'static>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {label} "), Style::default().fg(Color::DarkGray)),
        value,
    ])
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let viewport = app.dashboard.state().viewport;
    let bounds = viewport.bounds(app.map_aspect);

    let markers: Vec<MarkerView> = app
        .visible_features()
        .iter()
        .map(|feature| MarkerView::new(feature, app.selected_feature == Some(feature.id)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Map ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(format!(" {} ", camera_caption(&viewport))));

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([bounds.west, bounds.east])
        .y_bounds([bounds.south, bounds.north])
        .paint(|ctx| {
            ctx.draw(&Map {
                color: Color::DarkGray,
                resolution: MapResolution::High,
            });
            ctx.layer();

            for marker in &markers {
                ctx.print(
                    within(&bounds, marker.longitude),
                    marker.latitude,
                    marker_span(marker),
                );
            }
        });

    frame.render_widget(canvas, area);
}

fn marker_span(marker: &MarkerView) -> Span<'static> {
    let (symbol, color) = if marker.cluster {
        ("◉", Color::Yellow)
    } else {
        ("●", Color::Red)
    };

    let mut style = Style::default().fg(color);
    if marker.selected {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }
    Span::styled(format!("{symbol} {}", marker.text), style)
}

/// Shift a longitude by a whole turn so it lands inside the map bounds
fn within(bounds: &Bounds, longitude: f64) -> f64 {
    [longitude, longitude - 360.0, longitude + 360.0]
        .into_iter()
        .find(|lng| *lng >= bounds.west && *lng <= bounds.east)
        .unwrap_or(longitude)
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = FooterView::new(&app.dashboard.state().summary, &app.offset);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", FooterView::TITLE),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(inner);
    let stats = [&footer.updated, &footer.cases, &footer.deaths, &footer.recovered];
    for (stat, column) in stats.into_iter().zip(columns.iter()) {
        frame.render_widget(stat_cell(stat), *column);
    }
}

fn stat_cell(stat: &Stat) -> Paragraph<'static> {
    Paragraph::new(vec![
        Line::from(Span::styled(stat.label, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            stat.value.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ])
}
