//! End-to-end coverage for annotated adapters wired through `App`.

use std::sync::Arc;

use anyhow::{Result, bail, ensure};
use fxx::{Annotation, App, FxxError, Invoke, Provide, Wiring, with_annotated};
use fxx_test_helpers::capture::Capture;
use rstest::rstest;

#[derive(Debug)]
struct Conn(&'static str);

#[derive(Debug)]
struct Server {
    primary: &'static str,
    read_only: &'static str,
}

fn connections() -> Vec<Wiring> {
    vec![
        Provide::value(Conn("primary")).into(),
        Provide::value(Conn("replica")).named("ro").into(),
    ]
}

#[rstest]
fn provides_values_built_from_annotated_parameters() -> Result<()> {
    let server = Provide::from_adapter(with_annotated([Annotation::by_name("ro")]).build(
        |read_only: Arc<Conn>, primary: Arc<Conn>| {
            Ok::<_, FxxError>(Server {
                primary: primary.0,
                read_only: read_only.0,
            })
        },
    ));
    let mut wirings = connections();
    wirings.push(server.into());
    let app = App::new(wirings)?;
    let built: Arc<Server> = app.resolve()?;
    ensure!(built.read_only == "replica", "got {built:?}");
    ensure!(built.primary == "primary", "got {built:?}");
    Ok(())
}

#[rstest]
fn provides_into_names_and_groups() -> Result<()> {
    let app = App::new([
        Provide::value(Conn("a")).grouped("pool").into(),
        Provide::value(Conn("b")).grouped("pool").into(),
        Provide::from_adapter(with_annotated([Annotation::by_group("pool")]).build(
            |pool: Vec<Arc<Conn>>| Ok::<_, FxxError>(pool.len()),
        ))
        .named("pool-size")
        .into(),
    ])?;
    let size: Arc<usize> = app.resolve_annotated(Annotation::by_name("pool-size"))?;
    ensure!(*size == 2);
    let pool: Vec<Arc<Conn>> = app.resolve_annotated(Annotation::by_group("pool"))?;
    let names: Vec<_> = pool.iter().map(|conn| conn.0).collect();
    ensure!(names == ["a", "b"]);
    Ok(())
}

#[rstest]
fn invokes_annotated_functions_in_order() -> Result<()> {
    let order = Capture::<Vec<&'static str>>::new();
    let first = order.clone();
    let second = order.clone();
    let mut wirings = connections();
    wirings.push(
        Invoke::from_adapter(with_annotated([Annotation::by_name("ro")]).build(
            move |conn: Arc<Conn>| {
                first.set(vec![conn.0]);
            },
        ))
        .into(),
    );
    wirings.push(
        Invoke::new(move |conn: Arc<Conn>| {
            let mut seen = second.take().unwrap_or_default();
            seen.push(conn.0);
            second.set(seen);
        })
        .into(),
    );
    App::new(wirings)?;
    ensure!(order.get() == Some(vec!["replica", "primary"]));
    Ok(())
}

#[rstest]
fn optional_slot_yields_empty_value() -> Result<()> {
    let seen = Capture::new();
    let sink = seen.clone();
    App::new([Invoke::from_adapter(
        with_annotated([Annotation::by_name("absent").optional()])
            .build(move |conn: Option<Arc<Conn>>| sink.set(conn.is_none())),
    )
    .into()])?;
    ensure!(seen.get() == Some(true));
    Ok(())
}

#[rstest]
fn required_slot_reports_missing_dependency() -> Result<()> {
    let result = App::new([Invoke::from_adapter(
        with_annotated([Annotation::by_name("absent")]).build(|_: Option<Arc<Conn>>| ()),
    )
    .into()]);
    let Err(err) = result else {
        bail!("composition must fail");
    };
    ensure!(
        matches!(err.root(), FxxError::MissingDependency { .. }),
        "got {err}"
    );
    ensure!(err.is_resolution());
    Ok(())
}

#[rstest]
fn too_many_annotations_fail_only_when_invoked() -> Result<()> {
    let adapter = with_annotated([Annotation::by_name("ro"), Annotation::by_name("extra")])
        .build(|conn: Arc<Conn>| Ok::<_, FxxError>(conn.0.len()));
    // Registration succeeds; resolution reports the shape error.
    let mut wirings = connections();
    wirings.push(Provide::from_adapter(adapter).into());
    let app = App::new(wirings)?;
    let Err(err) = app.resolve::<Arc<usize>>() else {
        bail!("resolution must fail");
    };
    ensure!(
        matches!(
            err.root(),
            FxxError::InvalidTarget {
                expected: 2,
                actual: 1
            }
        ),
        "got {err}"
    );
    Ok(())
}

#[rstest]
fn duplicate_names_fail_composition() -> Result<()> {
    let result = App::new([
        Provide::value(Conn("a")).named("main").into(),
        Provide::value(Conn("b")).named("main").into(),
        Invoke::new(|| -> Result<(), FxxError> { Err(FxxError::NoConfigProviders) }).into(),
    ]);
    let Err(err) = result else {
        bail!("composition must fail");
    };
    ensure!(err.is_composition(), "got {err}");
    Ok(())
}
