use insta::assert_snapshot;
use serde_json::json;
use templator_core::coerce::{CoercionMode, RawInputs};
use templator_core::{JinjaRenderer, PipelineError, RenderError, render_template};

const ORDER: &str = r#"{#- @variable customer: label="Customer", required=true -#}
{#- @variable items: type=array, label="Items" -#}
{#- @variable total: type=number -#}
{#- @variable rush: type=boolean -#}
Dear {{ customer }},
Items: {{ items | join(", ") }}
Total: {{ total }}{% if rush %} (rush){% endif %}"#;

fn order_inputs() -> RawInputs {
    [
        ("customer".to_string(), json!("Ana")),
        ("items".to_string(), json!("pen\npaper\n\nink")),
        ("total".to_string(), json!("12.5")),
        ("rush".to_string(), json!("1")),
    ]
    .into_iter()
    .collect()
}

#[test]
fn renders_order_confirmation() {
    let out = render_template(ORDER, &order_inputs(), &JinjaRenderer::new(), CoercionMode::Lenient)
        .expect("render ok");

    assert_snapshot!(out.result, @r"
    Dear Ana,
    Items: pen, paper, ink
    Total: 12.5 (rush)
    ");
}

#[test]
fn echoes_coerced_inputs() {
    let out = render_template(ORDER, &order_inputs(), &JinjaRenderer::new(), CoercionMode::Lenient)
        .expect("render ok");

    assert_eq!(
        serde_json::to_value(&out.inputs).unwrap(),
        json!({
            "customer": "Ana",
            "items": ["pen", "paper", "ink"],
            "rush": true,
            "total": 12.5
        })
    );
}

#[test]
fn unresolved_variable_is_render_error() {
    let mut inputs = order_inputs();
    inputs.remove("customer");

    let err = render_template(ORDER, &inputs, &JinjaRenderer::new(), CoercionMode::Lenient)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Render(RenderError::UndefinedVariable(_))));
}

#[test]
fn variable_used_but_not_declared_is_render_error() {
    let tpl = "{#- @variable a: type=string -#}{{ a }}{{ b }}";
    let inputs: RawInputs = [("a".to_string(), json!("x"))].into_iter().collect();

    let err =
        render_template(tpl, &inputs, &JinjaRenderer::new(), CoercionMode::Lenient).unwrap_err();
    assert!(err.to_string().starts_with("rendering error:"));
}

#[test]
fn strict_mode_surfaces_bad_number() {
    let mut inputs = order_inputs();
    inputs.insert("total".to_string(), json!("twelve"));

    let err = render_template(ORDER, &inputs, &JinjaRenderer::new(), CoercionMode::Strict)
        .unwrap_err();
    assert_eq!(err.to_string(), "invalid number for 'total': twelve");
}

#[test]
fn lenient_mode_renders_bad_number_as_zero() {
    let mut inputs = order_inputs();
    inputs.insert("total".to_string(), json!("twelve"));

    let out = render_template(ORDER, &inputs, &JinjaRenderer::new(), CoercionMode::Lenient)
        .expect("render ok");
    assert!(out.result.ends_with("Total: 0.0 (rush)"), "got {}", out.result);
}

#[test]
fn datetime_fields_are_usable_in_templates() {
    let tpl = "{#- @variable due: type=datetime -#}\
               Due {{ due.day }}/{{ due.month }}/{{ due.year }} \
               ({{ due.strftime('%A') }})";
    let inputs: RawInputs = [("due".to_string(), json!("2024-01-15"))].into_iter().collect();

    let out = render_template(tpl, &inputs, &JinjaRenderer::new(), CoercionMode::Lenient)
        .expect("render ok");
    assert_eq!(out.result, "Due 15/1/2024 (Monday)");
    assert_eq!(serde_json::to_value(&out.inputs).unwrap(), json!({"due": "2024-01-15 00:00:00"}));
}

#[test]
fn bad_strftime_pattern_is_render_error() {
    let tpl = "{#- @variable due: type=datetime -#}{{ due.strftime('%Q') }}";
    let inputs: RawInputs = [("due".to_string(), json!("2024-01-15"))].into_iter().collect();

    let err = render_template(tpl, &inputs, &JinjaRenderer::new(), CoercionMode::Lenient)
        .unwrap_err();
    assert!(matches!(err, PipelineError::Render(RenderError::Other(_))), "got {err:?}");
}
