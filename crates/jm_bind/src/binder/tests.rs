use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use alloc::{format, vec};

use jm_path::NamePath;
use jm_reflect::info::{BeanInfo, ComponentInfo, PropertyInfo, RecordInfo, Type, TypeInfo};
use jm_reflect::{BoxedValue, ReflectError, Typed};

use crate::binder::{BindContext, Binder, BindingStrategy, ObjectBinder};
use crate::callback::{BindCallback, IgnoreErrors, Recovery};
use crate::source::{DataSource, Node, NodeKind};
use crate::strategy::{TypeBinder, priority};
use crate::{BindError, BindResult, Bindable, ConversionError};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Debug, Clone, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

impl Typed for Person {
    fn type_info() -> TypeInfo {
        TypeInfo::Record(RecordInfo::new::<Self>(
            [ComponentInfo::new::<String>("name"), ComponentInfo::new::<u32>("age")],
            |values| {
                Ok(Person {
                    name: values.require("name")?,
                    age: values.take_or_default("age")?,
                })
            },
        ))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Team {
    lead: Option<Person>,
    size: u8,
}

impl Typed for Team {
    fn type_info() -> TypeInfo {
        TypeInfo::Record(RecordInfo::new::<Self>(
            [ComponentInfo::new::<Person>("lead"), ComponentInfo::new::<u8>("size")],
            |values| {
                Ok(Team {
                    lead: values.take("lead")?,
                    size: values.take_or_default("size")?,
                })
            },
        ))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Tls {
    enabled: bool,
    cert: String,
}

impl Typed for Tls {
    fn type_info() -> TypeInfo {
        TypeInfo::Bean(
            BeanInfo::new::<Self>([
                PropertyInfo::new("enabled", |t: &mut Tls, v: bool| t.enabled = v),
                PropertyInfo::new("cert", |t: &mut Tls, v: String| t.cert = v),
            ])
            .with_default_factory::<Self>(),
        )
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
struct Server {
    host: String,
    port: u16,
    hosts: Vec<String>,
    tls: Tls,
    labels: BTreeMap<String, String>,
    max_connections: u32,
}

impl Typed for Server {
    fn type_info() -> TypeInfo {
        TypeInfo::Bean(
            BeanInfo::new::<Self>([
                PropertyInfo::new("host", |s: &mut Server, v: String| s.host = v),
                PropertyInfo::new("port", |s: &mut Server, v: u16| s.port = v),
                PropertyInfo::new("hosts", |s: &mut Server, v: Vec<String>| s.hosts = v)
                    .with_getter(|s: &Server| s.hosts.clone()),
                PropertyInfo::new("tls", |s: &mut Server, v: Tls| s.tls = v)
                    .with_getter(|s: &Server| s.tls.clone()),
                PropertyInfo::new("labels", |s: &mut Server, v: BTreeMap<String, String>| {
                    s.labels = v;
                }),
                PropertyInfo::new("max_connections", |s: &mut Server, v: u32| {
                    s.max_connections = v;
                })
                .with_preferred_name("max-connections"),
                PropertyInfo::read_only("address", |s: &Server| format!("{}:{}", s.host, s.port)),
            ])
            .with_default_factory::<Self>(),
        )
    }
}

fn source(json: &str) -> DataSource {
    let mut de = serde_json::Deserializer::from_str(json);
    DataSource::from_deserializer(&mut de).unwrap()
}

fn binder(json: &str) -> Binder {
    Binder::new(source(json))
}

const SERVER: &str = r#"{
    "server": {
        "host": "example.org",
        "port": "8443",
        "hosts": ["a", "b"],
        "tls": { "enabled": "yes", "cert": "c.pem" },
        "labels": { "env": "prod", "eu.west": "1" },
        "max-connections": 100,
        "address": "ignored"
    }
}"#;

// -----------------------------------------------------------------------------
// Scalars and absence

#[test]
fn scalars_are_converted() {
    let binder = binder(r#"{ "server": { "port": 8080, "debug": "on", "ratio": "0.5" } }"#);

    assert_eq!(binder.bind::<u16>("server.port").get().unwrap(), 8080);
    assert_eq!(binder.bind::<String>("server.port").get().unwrap(), "8080");
    assert!(binder.bind::<bool>("server.debug").get().unwrap());
    assert_eq!(binder.bind::<f64>("server.ratio").get().unwrap(), 0.5);
}

#[test]
fn missing_path_is_empty() {
    let binder = binder(r#"{ "server": { "port": 8080, "nothing": null } }"#);

    assert!(binder.bind::<u16>("server.missing").is_empty());
    assert!(binder.bind::<u16>("server.nothing").is_empty());
    assert!(binder.bind::<Server>("client").is_empty());
    assert!(binder.bind::<Vec<u16>>("server.list").is_empty());
    assert_eq!(binder.in_flight(), 0);
}

#[test]
fn conversion_failure_names_the_path() {
    let binder = binder(r#"{ "server": { "port": "http" } }"#);

    let error = binder.bind::<u16>("server.port").get().unwrap_err();
    assert_eq!(error.path(), Some("server.port"));
    assert!(matches!(
        error.root_cause(),
        BindError::Conversion(ConversionError::Invalid { .. })
    ));
}

// -----------------------------------------------------------------------------
// Records

#[test]
fn record_from_map() {
    let binder = binder(r#"{ "name": "John" }"#);

    let person = binder.bind::<Person>("").get().unwrap();
    assert_eq!(
        person,
        Person {
            name: "John".to_string(),
            age: 0
        }
    );
}

#[test]
fn record_constructor_decides_on_missing_components() {
    let binder = binder(r#"{ "person": { "age": 42 } }"#);

    let error = binder.bind::<Person>("person").get().unwrap_err();
    assert!(matches!(
        error.root_cause(),
        BindError::Instantiation {
            source: ReflectError::MissingComponent { name: "name", .. },
            ..
        }
    ));
}

#[test]
fn nested_records_and_shallow_binding() {
    let json = r#"{ "team": { "lead": { "name": "Ada", "age": 36 }, "size": 4 } }"#;

    let deep = binder(json).bind::<Team>("team").get().unwrap();
    assert_eq!(deep.size, 4);
    assert_eq!(deep.lead.map(|lead| lead.age), Some(36));

    let mut shallow = binder(json);
    shallow.use_shallow_binding();
    let team = shallow.bind::<Team>("team").get().unwrap();
    assert_eq!(team.size, 4);
    assert_eq!(team.lead, None);
}

#[test]
fn shallow_binding_still_fills_collections() {
    let json = r#"{
        "teams": [
            { "lead": { "name": "Ada" }, "size": 2 },
            { "size": 3 }
        ]
    }"#;
    let binder = Binder::builder(source(json))
        .binding_strategy(BindingStrategy::Shallow)
        .build();

    let teams = binder.bind::<Vec<Team>>("teams").get().unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[1].size, 3);
    assert!(teams.iter().all(|team| team.lead.is_none()));
}

// -----------------------------------------------------------------------------
// Beans

#[test]
fn bean_binding_is_deep_by_default() {
    let binder = binder(SERVER);

    let server = binder.bind::<Server>("server").get().unwrap();
    assert_eq!(server.host, "example.org");
    assert_eq!(server.port, 8443);
    assert_eq!(server.hosts, ["a", "b"]);
    assert_eq!(
        server.tls,
        Tls {
            enabled: true,
            cert: "c.pem".to_string()
        }
    );
    assert_eq!(server.labels.get("env").map(String::as_str), Some("prod"));
    assert_eq!(server.labels.get("eu.west").map(String::as_str), Some("1"));
    assert_eq!(server.max_connections, 100);
    assert_eq!(binder.in_flight(), 0);
}

#[test]
fn shallow_binding_leaves_nested_properties() {
    let binder = Binder::builder(source(SERVER))
        .binding_strategy(BindingStrategy::Shallow)
        .build();

    let server = binder.bind::<Server>("server").get().unwrap();
    assert_eq!(server.host, "example.org");
    assert_eq!(server.port, 8443);
    assert_eq!(server.max_connections, 100);
    assert!(server.hosts.is_empty());
    assert!(server.labels.is_empty());
    assert_eq!(server.tls, Tls::default());
}

#[test]
fn bind_into_existing_instance() {
    let binder = binder(r#"{ "server": { "port": 2, "hosts": ["b"] } }"#);
    let existing = Server {
        host: "keep".to_string(),
        port: 1,
        hosts: vec!["a".to_string()],
        ..Server::default()
    };

    let server = binder.bind_instance("server", existing.clone()).get().unwrap();
    assert_eq!(server.host, "keep");
    assert_eq!(server.port, 2);
    assert_eq!(server.hosts, ["a", "b"]);

    let untouched = binder.bind_instance("client", existing.clone()).get().unwrap();
    assert_eq!(untouched, existing);
}

#[test]
fn supplied_instance_is_used() {
    let binder = binder(r#"{ "tls": { "enabled": true } }"#);
    binder.register::<Tls>();

    let bindable = Bindable::of::<Tls>().with_supplier(|| {
        Box::new(Tls {
            enabled: false,
            cert: "default.pem".to_string(),
        })
    });
    let tls = binder.bind_bindable("tls", bindable).downcast::<Tls>().get().unwrap();
    assert!(tls.enabled);
    assert_eq!(tls.cert, "default.pem");
}

#[test]
fn sibling_failures_are_aggregated() {
    let json = r#"{ "server": { "host": "h", "port": "x", "max-connections": "y" } }"#;

    let error = binder(json).bind::<Server>("server").get().unwrap_err();
    let BindError::Properties { ty, errors } = error.root_cause() else {
        panic!("unexpected error: {error:?}");
    };
    assert!(ty.ends_with("Server"));
    let paths: Vec<_> = errors.iter().filter_map(BindError::path).collect();
    assert_eq!(paths, ["server.port", "server.max-connections"]);

    let server = Binder::with(source(json), IgnoreErrors)
        .bind::<Server>("server")
        .get()
        .unwrap();
    assert_eq!(server.host, "h");
    assert_eq!(server.port, 0);
}

#[test]
fn scalar_node_cannot_become_a_bean() {
    let error = binder(r#"{ "server": "oops" }"#)
        .bind::<Server>("server")
        .get()
        .unwrap_err();
    assert!(matches!(
        error.root_cause(),
        BindError::Conversion(ConversionError::Unsupported {
            from: NodeKind::Scalar,
            ..
        })
    ));
}

#[test]
fn opaque_nodes_pass_through() {
    let binder = binder(SERVER);

    let tls = binder.bind::<Node>("server.tls").get().unwrap();
    assert!(tls.is_map());
    assert_eq!(tls.len(), 2);
}

// -----------------------------------------------------------------------------
// Collections

#[test]
fn sequences_keep_order() {
    let binder = binder(r#"{ "list": [3, 1, 2, 1], "empty": [] }"#);

    assert_eq!(binder.bind::<Vec<u8>>("list").get().unwrap(), [3, 1, 2, 1]);
    assert_eq!(binder.bind::<VecDeque<u8>>("list").get().unwrap(), [3, 1, 2, 1]);
    assert_eq!(binder.bind::<[u8; 4]>("list").get().unwrap(), [3, 1, 2, 1]);
    assert_eq!(binder.bind::<Box<[u8]>>("list").get().unwrap().len(), 4);
    assert!(binder.bind::<Vec<u8>>("empty").get().unwrap().is_empty());

    let set = binder.bind::<BTreeSet<u8>>("list").get().unwrap();
    assert_eq!(set.into_iter().collect::<Vec<_>>(), [1, 2, 3]);
}

#[test]
fn fixed_arrays_check_length() {
    let binder = binder(r#"{ "list": [1, 2, 3, 4] }"#);

    let error = binder.bind::<[u8; 3]>("list").get().unwrap_err();
    assert!(matches!(
        error.root_cause(),
        BindError::Reflect(ReflectError::LengthMismatch {
            expected: 3,
            actual: 4,
            ..
        })
    ));
}

#[test]
fn null_elements() {
    let binder = binder(r#"{ "list": [1, null, 3] }"#);

    assert_eq!(binder.bind::<Vec<u8>>("list").get().unwrap(), [1, 3]);

    let error = binder.bind::<[u8; 3]>("list").get().unwrap_err();
    assert!(matches!(error.root_cause(), BindError::MissingElement(path) if path == "list[1]"));
}

#[test]
fn maps_of_records() {
    let binder = binder(
        r#"{ "people": { "john": { "name": "John" }, "jane": { "name": "Jane", "age": 30 } } }"#,
    );

    let people = binder.bind::<BTreeMap<String, Person>>("people").get().unwrap();
    assert_eq!(people.len(), 2);
    assert_eq!(people["jane"].age, 30);
    assert_eq!(people["john"].name, "John");

    let error = binder.bind::<Vec<Person>>("people").get().unwrap_err();
    assert!(matches!(
        error.root_cause(),
        BindError::Conversion(ConversionError::Unsupported {
            from: NodeKind::Map,
            ..
        })
    ));
}

#[test]
fn map_keys_that_are_not_one_segment_fail() {
    let binder = binder(r#"{ "ports": { "http": 80, "a]b": 8080 } }"#);

    let error = binder.bind::<BTreeMap<String, u16>>("ports").get().unwrap_err();
    assert!(matches!(
        error.root_cause(),
        BindError::UnaddressableKey { key, .. } if key == "a]b"
    ));

    let ports = binder.bind::<BTreeMap<String, u16>>("ports.http");
    assert!(ports.is_failed());
}

// -----------------------------------------------------------------------------
// Placeholders and cycles

#[test]
fn placeholders() {
    let binder = binder(
        r#"{
            "host": "localhost",
            "port": 8080,
            "url": "http://${host}:${port}/",
            "alias": "${port}",
            "unknown": "${nope} here"
        }"#,
    );

    assert_eq!(binder.bind::<String>("url").get().unwrap(), "http://localhost:8080/");
    assert_eq!(binder.bind::<u16>("alias").get().unwrap(), 8080);
    assert_eq!(binder.bind::<String>("unknown").get().unwrap(), "${nope} here");
}

#[test]
fn cyclic_alias_fails_and_releases_paths() {
    let binder = binder(r#"{ "a": "${b}", "b": "${a}" }"#);

    let first = binder.bind::<String>("a");
    assert!(first.is_failed());
    assert!(first.error().is_some_and(BindError::is_recursive));
    assert_eq!(binder.in_flight(), 0);

    let second = binder.bind::<String>("a");
    assert_eq!(
        first.error().map(ToString::to_string),
        second.error().map(ToString::to_string)
    );
    assert_eq!(binder.in_flight(), 0);
}

#[test]
fn self_reference_inside_a_bean() {
    let binder = binder(r#"{ "server": { "host": "${server.host}", "port": 1 } }"#);

    let error = binder.bind::<Server>("server").get().unwrap_err();
    assert!(error.is_recursive());
    assert_eq!(binder.in_flight(), 0);
}

// -----------------------------------------------------------------------------
// Callbacks and options

#[test]
fn callback_fallback_and_ignore() {
    let json = r#"{ "port": "abc" }"#;
    let fallback = |_: &NamePath, target: &Type, error: BindError| {
        if target.is::<u16>() {
            Recovery::fallback(80_u16)
        } else {
            Recovery::Fail(error)
        }
    };

    let binder = binder(json);
    assert_eq!(binder.bind_with::<u16>("port", &fallback).get().unwrap(), 80);
    assert!(binder.bind_with::<u32>("port", &fallback).is_failed());
    assert!(binder.bind_with::<u16>("port", &IgnoreErrors).is_empty());

    let mut binder = Binder::with(source(json), IgnoreErrors);
    assert!(binder.bind::<u16>("port").is_empty());
    binder.set_default_callback(());
    assert!(binder.bind::<u16>("port").is_failed());
}

#[test]
fn orchestrator_does_not_convert_values() {
    let binder = binder(r#"{ "port": 8080 }"#);
    binder.register::<u16>();

    let result = ObjectBinder::bind_value(
        &binder,
        &NamePath::new("port"),
        Bindable::of::<u16>(),
        binder.data_source(),
        &(),
    );
    assert!(matches!(result, BindResult::Failed(BindError::Unsupported(_))));
    assert_eq!(binder.in_flight(), 0);
}

#[test]
fn unregistered_types_fail() {
    struct Unknown;

    let binder = binder(r#"{ "x": 1 }"#);
    let error = binder
        .bind_bindable("x", Bindable::of::<Unknown>())
        .get()
        .unwrap_err();
    assert!(matches!(error.root_cause(), BindError::UnregisteredType(_)));
}

struct Constant;

impl TypeBinder for Constant {
    fn name(&self) -> &'static str {
        "constant"
    }

    fn priority(&self) -> i32 {
        priority::SCALAR
    }

    fn supports(&self, info: &TypeInfo) -> bool {
        info.ty().is::<u16>()
    }

    fn bind(
        &self,
        _: &dyn BindContext,
        _: &NamePath,
        _: Bindable,
        _: &DataSource,
        _: &dyn BindCallback,
    ) -> BindResult<BoxedValue> {
        BindResult::Present(Box::new(7_u16))
    }
}

#[test]
fn custom_strategy_wins_ties() {
    let binder = Binder::builder(source(r#"{ "port": 8080 }"#))
        .binder(Constant)
        .build();

    assert_eq!(binder.bind::<u16>("port").get().unwrap(), 7);
    assert_eq!(binder.bind::<u32>("port").get().unwrap(), 8080);
}

#[test]
fn ron_source() {
    let node: Node = ron::from_str(r#"{ "name": "Ron", "age": 7 }"#).unwrap();
    let binder = Binder::new(node);

    let person = binder.bind::<Person>("").get().unwrap();
    assert_eq!(person.name, "Ron");
    assert_eq!(person.age, 7);
}
