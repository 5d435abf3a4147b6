use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde_json::Value as Json;

#[derive(Parser, Debug)]
#[command(name = "style-expr", version)]
struct Cli {
    /// Log parse and evaluation diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse and type-check an expression; print its type and normalized form.
    Check(CheckArgs),
    /// Evaluate an expression at a zoom level against feature properties.
    Eval(EvalArgs),
    /// Build a style function from a property definition and evaluate it.
    Function(FunctionArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Expression JSON.
    #[arg(long)]
    expr: String,

    /// Expected result type, e.g. `Number` or `Array<Number, 2>`.
    #[arg(long = "type")]
    ty: Option<String>,
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Expression JSON.
    #[arg(long)]
    expr: String,

    /// Expected result type.
    #[arg(long = "type")]
    ty: Option<String>,

    /// Zoom level.
    #[arg(long, default_value_t = 0.0)]
    zoom: f64,

    /// Feature properties as a JSON object.
    #[arg(long, default_value = "{}")]
    props: String,
}

#[derive(Parser, Debug)]
struct FunctionArgs {
    /// Property spec JSON, e.g. `{"type": "color", "default": "#000"}`.
    #[arg(long)]
    spec: String,

    /// Property value: a constant, a legacy function or `{"expression": ...}`.
    #[arg(long)]
    value: String,

    /// Zoom level.
    #[arg(long, default_value_t = 0.0)]
    zoom: f64,

    /// Feature properties as a JSON object.
    #[arg(long, default_value = "{}")]
    props: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Eval(args) => cmd_eval(args),
        Command::Function(args) => cmd_function(args),
    }
}

fn parse_json(text: &str, what: &str) -> anyhow::Result<Json> {
    serde_json::from_str(text).with_context(|| format!("parse {what} JSON"))
}

fn parse_expected(ty: Option<&str>) -> anyhow::Result<Option<style_expr::Type>> {
    ty.map(|name| {
        style_expr::parse_type(name).with_context(|| format!("unknown type '{name}'"))
    })
    .transpose()
}

fn compile(expr: &str, ty: Option<&str>) -> anyhow::Result<style_expr::CompiledExpression> {
    let json = parse_json(expr, "expression")?;
    let expected = parse_expected(ty)?;
    style_expr::compile_expression(&json, expected).map_err(|errors| {
        for e in errors.iter() {
            eprintln!("{e}");
        }
        anyhow::anyhow!("expression has {} error(s)", errors.errors.len())
    })
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let compiled = compile(&args.expr, args.ty.as_deref())?;
    let report = serde_json::json!({
        "type": compiled.ty().name(),
        "isFeatureConstant": compiled.is_feature_constant(),
        "isZoomConstant": compiled.is_zoom_constant(),
        "expression": compiled.serialize(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let compiled = compile(&args.expr, args.ty.as_deref())?;
    let props = style_expr::properties_from_json(&parse_json(&args.props, "properties")?);
    let out = match compiled.evaluate(args.zoom, &props) {
        Ok(v) => v.to_json(),
        Err(e) => e.to_json(),
    };
    println!("{out}");
    Ok(())
}

fn cmd_function(args: FunctionArgs) -> anyhow::Result<()> {
    let spec: style_expr::PropertySpec =
        serde_json::from_str(&args.spec).with_context(|| "parse property spec JSON")?;
    let value = parse_json(&args.value, "property value")?;
    let f = style_expr::create_function(&value, &spec)?;
    let props = style_expr::properties_from_json(&parse_json(&args.props, "properties")?);

    let result = f.evaluate(args.zoom, &props)?;
    let report = serde_json::json!({
        "value": result.map_or(Json::Null, |v| v.to_json()),
        "isFeatureConstant": f.is_feature_constant(),
        "isZoomConstant": f.is_zoom_constant(),
        "zoomStops": f.zoom_stops(),
        "interpolationT": f.interpolation_t(args.zoom)?,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
