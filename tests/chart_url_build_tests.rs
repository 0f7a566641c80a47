use gchart_rs::api::{BASE_URL, ChartBuilder};
use gchart_rs::core::{ChartKind, FillType, LabelPosition, OptionStore, OptionValue, TitleAlign};
use serde_json::json;

fn line_chart() -> ChartBuilder {
    let mut builder = ChartBuilder::new();
    builder
        .set_type("lc")
        .set_size(300, 200)
        .set_datas([[1, 2, 3]])
        .expect("numeric datas");
    builder
}

fn query_of(url: &str) -> &str {
    url.strip_prefix(BASE_URL)
        .and_then(|rest| rest.strip_prefix('?'))
        .expect("url starts with base endpoint")
}

#[test]
fn minimal_line_chart_url() {
    let url = line_chart().build().expect("complete chart");
    assert_eq!(
        url,
        "http://chart.googleapis.com/chart?cht=lc&chs=300x200&chd=t:1,2,3"
    );
}

#[test]
fn series_are_pipe_joined_and_values_comma_joined() {
    let mut builder = line_chart();
    builder
        .set_datas(vec![vec![1.5, 2.0], vec![-3.0, 40.25, 0.0]])
        .expect("numeric datas");
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chd=t:1.5,2|-3,40.25,0"));
}

#[test]
fn line_chart_colors_are_comma_joined() {
    let mut builder = line_chart();
    builder.set_colors(["ff0000", "00ff00"]).expect("hex colors");
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chd=t:1,2,3&chco=ff0000,00ff00"));
}

#[test]
fn other_chart_colors_are_pipe_joined() {
    let mut builder = line_chart();
    builder
        .set_kind(ChartKind::BarVerticalGrouped)
        .set_colors(["ff0000", "00ff00"])
        .expect("hex colors");
    let url = builder.build().expect("complete chart");
    assert!(url.contains("cht=bvg"));
    assert!(url.ends_with("&chco=ff0000|00ff00"));
}

#[test]
fn label_color_and_font_size_share_one_parameter() {
    let mut builder = line_chart();
    builder
        .set_labels(["a", "b", "c"])
        .expect("labels")
        .set_labels_options(OptionStore::from_entries([
            ("color", OptionValue::from("ffffff")),
            ("font-size", OptionValue::from(12)),
        ]))
        .expect("label options");
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chl=a|b|c&chdls=ffffff,12"));
}

#[test]
fn label_font_size_without_color_leaves_empty_color_slot() {
    let mut builder = line_chart();
    builder
        .set_labels(["a"])
        .expect("labels")
        .set_labels_options(OptionStore::from_entries([("font-size", 12)]))
        .expect("label options");
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chl=a&chdls=,12"));
}

#[test]
fn label_position_precedes_label_style() {
    let mut builder = line_chart();
    builder
        .set_labels([2023, 2024])
        .expect("labels")
        .set_labels_style(Some(LabelPosition::Bottom), Some("333333"), Some(10.0))
        .expect("label style");
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chl=2023|2024&chdlp=b&chdls=333333,10"));
}

#[test]
fn label_options_are_ignored_without_labels() {
    let mut builder = line_chart();
    builder
        .set_labels_style(Some(LabelPosition::Top), Some("333333"), None)
        .expect("label style");
    let url = builder.build().expect("complete chart");
    assert!(!url.contains("chdlp"));
    assert!(!url.contains("chdls"));
}

#[test]
fn title_is_form_encoded() {
    let mut builder = line_chart();
    builder.set_title("Sales & Costs 2024");
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chtt=Sales+%26+Costs+2024"));
}

#[test]
fn title_style_components_continue_or_open_fresh() {
    let cases = [
        ((Some("ff0000"), Some(14.0), Some(TitleAlign::Center)), "&chts=ff0000,14,center"),
        ((Some("ff0000"), None, None), "&chts=ff0000"),
        ((None, Some(14.0), None), "&chts=,14"),
        ((None, None, Some(TitleAlign::Right)), "&chts=,,right"),
        ((None, Some(14.0), Some(TitleAlign::Left)), "&chts=,14,left"),
        ((Some("ff0000"), None, Some(TitleAlign::Right)), "&chts=ff0000,right"),
    ];
    for ((color, font_size, align), expected_suffix) in cases {
        let mut builder = line_chart();
        builder
            .set_title("T")
            .set_title_style(color, font_size, align)
            .expect("title style");
        let url = builder.build().expect("complete chart");
        assert!(
            url.ends_with(&format!("&chtt=T{expected_suffix}")),
            "unexpected url {url} for {expected_suffix}"
        );
    }
}

#[test]
fn title_options_are_ignored_without_title() {
    let mut builder = line_chart();
    builder
        .set_title_style(Some("ff0000"), Some(14.0), None)
        .expect("title style");
    assert!(!builder.build().expect("complete chart").contains("chts"));
}

#[test]
fn fill_uses_chart_code_for_chart_type() {
    let mut builder = line_chart();
    builder.set_solid_fill(FillType::Chart, "efefef");
    assert!(builder.build().expect("complete").ends_with("&chf=c,s,efefef"));

    builder.set_fill(OptionStore::from_entries([("color", "abcdef")]));
    assert!(builder.build().expect("complete").ends_with("&chf=bg,s,abcdef"));

    builder.set_fill(OptionStore::from_entries([("type", "gradient"), ("color", "abcdef")]));
    assert!(builder.build().expect("complete").ends_with("&chf=bg,s,abcdef"));
}

#[test]
fn transparency_overrides_fill() {
    let mut builder = line_chart();
    builder
        .set_solid_fill(FillType::Chart, "efefef")
        .set_transparency(true);
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chf=bg,s,65432100"));
    assert_eq!(url.matches("chf=").count(), 1);
    assert!(!url.contains("efefef"));
}

#[test]
fn default_margins_are_not_emitted() {
    let url = line_chart().build().expect("complete chart");
    assert!(!url.contains("chma"));
}

#[test]
fn margins_render_all_six_slots_with_zero_for_missing() {
    let mut builder = line_chart();
    builder.set_margins(OptionStore::from_entries([("left", 20), ("legend-height", 5)]));
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chma=0,0,20,0,0,5"));
}

#[test]
fn margins_keep_fractional_values() {
    let mut builder = line_chart();
    builder.set_margins(OptionStore::from_entries([
        ("top", OptionValue::from(1.5)),
        ("bottom", OptionValue::from("2")),
        ("left", OptionValue::Null),
    ]));
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chma=1.5,2,0,0,0,0"));
}

#[test]
fn multi_dimensional_groups_render_comma_within_pipe_between() {
    let mut builder = line_chart();
    builder
        .set_line_style([[3, 6, 3], [1, 1, 0]])
        .set_line_fill([OptionStore::from_entries([
            ("type", "B"),
            ("color", "76a4fb"),
            ("index", "0"),
            ("start", "0"),
            ("end", "0"),
        ])])
        .set_axis_tick_mark_style([[0, 10]]);
    let url = builder.build().expect("complete chart");
    assert_eq!(
        url,
        "http://chart.googleapis.com/chart?cht=lc&chs=300x200&chls=3,6,3|1,1,0\
         &chd=t:1,2,3&chm=B,76a4fb,0,0,0&chxtc=0,10"
    );
}

#[test]
fn full_chart_emits_parameters_in_fixed_order() {
    let mut builder = ChartBuilder::new();
    builder
        .set_type("bvs")
        .set_size(400, 300)
        .set_line_style([[2, 4, 1]])
        .set_title("Quarterly")
        .set_solid_fill(FillType::Background, "f0f0f0")
        .set_line_fill([["B", "76a4fb", "0", "0", "0"]])
        .set_margins(OptionStore::from_entries([("top", 10), ("bottom", 5)]))
        .set_custom_scaling("0,100")
        .set_visible_axis("x,y")
        .set_axis_label_styles("0,ff0000,12")
        .set_axis_tick_mark_style([[0, 5]])
        .set_datas([[10, 20], [30, 40]])
        .expect("datas")
        .set_colors(["ff0000", "00ff00"])
        .expect("colors")
        .set_labels(["Q1", "Q2"])
        .expect("labels")
        .set_labels_style(Some(LabelPosition::Left), None, None)
        .expect("labels style")
        .set_title_style(Some("000000"), Some(14.0), Some(TitleAlign::Center))
        .expect("title style");

    let url = builder.build().expect("complete chart");
    let params: Vec<&str> = query_of(&url).split('&').collect();
    assert_eq!(
        params,
        vec![
            "cht=bvs",
            "chs=400x300",
            "chls=2,4,1",
            "chd=t:10,20|30,40",
            "chco=ff0000|00ff00",
            "chf=bg,s,f0f0f0",
            "chm=B,76a4fb,0,0,0",
            "chl=Q1|Q2",
            "chdlp=l",
            "chtt=Quarterly",
            "chts=000000,14,center",
            "chma=10,5,0,0,0,0",
            "chds=0,100",
            "chxt=x,y",
            "chxs=0,ff0000,12",
            "chxtc=0,5",
        ]
    );
}

#[test]
fn chart_legend_position_duplicates_label_position() {
    let mut builder = line_chart();
    builder
        .set_chart_legend_position("r")
        .set_labels(["a"])
        .expect("labels")
        .set_labels_style(Some(LabelPosition::Bottom), None, None)
        .expect("labels style");
    let url = builder.build().expect("complete chart");
    assert_eq!(url.matches("&chdlp=").count(), 2);
    assert!(url.ends_with("&chl=a&chdlp=b&chdlp=r"));
}

#[test]
fn empty_pass_through_values_are_skipped() {
    let mut builder = line_chart();
    builder.set_custom_scaling("").set_visible_axis("");
    let url = builder.build().expect("complete chart");
    assert!(!url.contains("chds"));
    assert!(!url.contains("chxt"));

    builder
        .set_custom_scaling("0")
        .set_visible_axis("0")
        .set_axis_label_styles("0")
        .set_chart_legend_position("0");
    assert_eq!(
        builder.build().expect("complete chart"),
        line_chart().build().expect("complete chart")
    );

    let from_bag = ChartBuilder::with_options([
        ("type", json!("lc")),
        ("width", json!(300)),
        ("height", json!(200)),
        ("datas", json!([1, 2, 3])),
        ("chart_legend_position", json!(0)),
        ("custom_scaling", json!(0)),
    ])
    .expect("valid options");
    let url = from_bag.build().expect("complete chart");
    assert!(!url.contains("chdlp"));
    assert!(!url.contains("chds"));
}

#[test]
fn numeric_text_in_series_renders_as_written() {
    let mut builder = line_chart();
    builder
        .set_datas([["1.50", "1e3", "007"]])
        .expect("numeric text");
    assert!(builder.build().expect("complete chart").ends_with("&chd=t:1.50,1e3,007"));
}

#[test]
fn margins_use_numeric_prefix_of_text() {
    let mut builder = line_chart();
    builder.set_margins(OptionStore::from_entries([
        ("top", "12px"),
        ("bottom", "wide"),
        ("left", " 3.5em"),
    ]));
    let url = builder.build().expect("complete chart");
    assert!(url.ends_with("&chma=12,0,3.5,0,0,0"));
}

#[test]
fn title_encoding_escapes_reserved_marks() {
    let mut builder = line_chart();
    builder.set_title("a*b~c");
    assert!(builder.build().expect("complete chart").ends_with("&chtt=a%2Ab%7Ec"));
}

#[test]
fn build_is_idempotent() {
    let mut builder = line_chart();
    builder
        .set_title("Twice")
        .set_colors(["aabbcc"])
        .expect("colors");
    let before = builder.clone();
    let first = builder.build().expect("first build");
    let second = builder.build().expect("second build");
    assert_eq!(first, second);
    assert_eq!(builder, before);
}
