//! 装配失败的分类与传播

mod common;

use common::{catalog, init_test_logger, manager};
use config_impl::{DescriptorMachine, MachineState, MarkupTokenizer};
use di_abstractions::ComponentRegistry;
use di_impl::ManifestScanner;
use wiring_common::{
    DependencyError, DescriptorError, FailureCategory, ManagerHandle, ScanError, WiringError,
    WiringResult,
};
use wiring_composition::{WiringBuilder, WiringContext};

fn wire(descriptor: &str) -> WiringResult<WiringContext> {
    init_test_logger();
    WiringBuilder::new()
        .with_catalog(catalog())
        .with_manager(manager())
        .wire_str(descriptor)
}

fn expect_err(result: WiringResult<WiringContext>) -> WiringError {
    match result {
        Ok(context) => panic!("期望装配失败，实际成功: {:?}", context.summary()),
        Err(error) => error,
    }
}

/// 服务依赖的能力没有注册时，错误指明服务和能力
#[test]
fn test_unresolved_capability_names_service_and_interface() {
    let error = expect_err(wire(
        r#"<wiring>
            <dao package="com.example.dao"/>
            <service class="com.example.billing.InvoiceService"/>
        </wiring>"#,
    ));

    match error {
        WiringError::Dependency {
            source: DependencyError::UnresolvedInjection { service, capability },
        } => {
            assert_eq!(service, "com.example.billing.InvoiceService");
            assert_eq!(capability, "com.example.api.InvoiceDao");
        }
        other => panic!("期望未解析注入错误，实际为 {other}"),
    }
}

/// 注入在描述文件结束后进行，声明顺序不影响结果
#[test]
fn test_injection_waits_for_end_of_descriptor() {
    let result = wire(
        r#"<wiring>
            <service class="com.example.service.ReportService"/>
            <dao class="com.example.dao.OrderDaoImpl"/>
        </wiring>"#,
    );
    assert!(result.is_ok());
}

#[test]
fn test_unknown_class_fails() {
    let error = expect_err(wire(r#"<wiring><dao class="com.example.dao.Missing"/></wiring>"#));
    assert!(matches!(
        error,
        WiringError::Dependency {
            source: DependencyError::TypeNotFound { ref type_name }
        } if type_name == "com.example.dao.Missing"
    ));
}

/// 构造失败报告类型名称和失败类别
#[test]
fn test_construction_failures_carry_category() {
    let cases = [
        ("com.example.broken.FailingDao", FailureCategory::InstantiationFailure),
        ("com.example.broken.NoConstructorDao", FailureCategory::MissingConstructor),
        ("com.example.broken.WrongShapeDao", FailureCategory::MissingConstructor),
        ("com.example.broken.SealedDao", FailureCategory::AccessDenied),
        ("com.example.broken.PanickyDao", FailureCategory::ConstructionException),
    ];

    for (class, expected) in cases {
        let descriptor = format!(r#"<wiring><dao class="{class}"/></wiring>"#);
        match expect_err(wire(&descriptor)) {
            WiringError::Dependency { source } => {
                assert_eq!(source.category(), Some(expected), "{class}");
                assert!(source.to_string().contains(class));

                let construction = std::error::Error::source(&source).unwrap();
                let cause = std::error::Error::source(construction);
                if expected == FailureCategory::ConstructionException {
                    assert_eq!(cause.unwrap().to_string(), "磁盘已满");
                } else {
                    assert!(cause.is_none(), "{class}");
                }
            }
            other => panic!("期望构造失败，实际为 {other}"),
        }
    }
}

#[test]
fn test_missing_manager_is_illegal_argument() {
    init_test_logger();
    let error = expect_err(
        WiringBuilder::new()
            .with_catalog(catalog())
            .with_manager(ManagerHandle::detached())
            .wire_str(r#"<wiring><dao class="com.example.dao.UserDaoImpl"/></wiring>"#),
    );
    assert!(matches!(
        error,
        WiringError::Dependency { ref source }
            if source.category() == Some(FailureCategory::IllegalArgument)
    ));
}

#[test]
fn test_declaration_target_errors() {
    let ambiguous = expect_err(wire(
        r#"<wiring><dao class="com.example.dao.UserDaoImpl" package="com.example.dao"/></wiring>"#,
    ));
    assert!(matches!(
        ambiguous,
        WiringError::Descriptor {
            source: DescriptorError::AmbiguousTarget { .. }
        }
    ));

    let missing = expect_err(wire(r#"<wiring><service class="   "/></wiring>"#));
    assert!(matches!(
        missing,
        WiringError::Descriptor {
            source: DescriptorError::MissingTarget { ref element }
        } if element == "service"
    ));
}

#[test]
fn test_property_errors() {
    let outside = expect_err(wire(
        r#"<wiring><property name="timeout" value="30"/></wiring>"#,
    ));
    assert!(matches!(
        outside,
        WiringError::Descriptor {
            source: DescriptorError::PropertyOutsideBlock
        }
    ));

    let unnamed = expect_err(wire(
        r#"<wiring><properties><property value="30"/></properties></wiring>"#,
    ));
    assert!(matches!(
        unnamed,
        WiringError::Descriptor {
            source: DescriptorError::MissingAttribute { ref attribute, .. }
        } if attribute == "name"
    ));
}

/// 格式错误的标记中止解析，未知元素被忽略
#[test]
fn test_malformed_markup_aborts() {
    let error = expect_err(wire(r#"<wiring><dao class="com.example.dao.UserDaoImpl"></wiring>"#));
    assert!(matches!(
        error,
        WiringError::Descriptor {
            source: DescriptorError::Malformed { .. }
        }
    ));

    let context = wire(
        r#"<!DOCTYPE wiring>
        <wiring><extension kind="future"/><dao class="com.example.dao.OrderDaoImpl"/></wiring>"#,
    )
    .unwrap();
    assert_eq!(context.data_access().len(), 2);
}

/// 根元素之外的元素或文本使整个装配失败
#[test]
fn test_content_outside_root_aborts() {
    let descriptors = [
        r#"<wiring/><wiring><dao class="com.example.dao.OrderDaoImpl"/></wiring>"#,
        r#"garbage<wiring><dao class="com.example.dao.OrderDaoImpl"/></wiring>"#,
        r#"<wiring><dao class="com.example.dao.OrderDaoImpl"/></wiring>trailing"#,
    ];

    for descriptor in descriptors {
        let error = expect_err(wire(descriptor));
        assert!(
            matches!(
                error,
                WiringError::Descriptor {
                    source: DescriptorError::Malformed { .. }
                }
            ),
            "{descriptor}: {error}"
        );
    }
}

#[test]
fn test_malformed_namespace_is_wrapped() {
    let error = expect_err(wire(r#"<wiring><dao package="com..example"/></wiring>"#));
    match error {
        WiringError::Scan { namespace, source } => {
            assert_eq!(namespace, "com..example");
            assert!(matches!(source, ScanError::MalformedNamespace { .. }));
        }
        other => panic!("期望扫描错误，实际为 {other}"),
    }
}

/// 类型清单中存在类型目录没有的类型
#[test]
fn test_manifest_type_missing_from_catalog() {
    init_test_logger();
    let scanner =
        ManifestScanner::from_toml(r#"types = ["com.example.service.GhostService"]"#).unwrap();
    let error = expect_err(
        WiringBuilder::new()
            .with_catalog(catalog())
            .with_scanner(scanner)
            .wire_str(r#"<wiring><service package="com.example.service"/></wiring>"#),
    );
    assert!(matches!(
        error,
        WiringError::Dependency {
            source: DependencyError::TypeNotFound { .. }
        }
    ));
}

/// 失败后状态机不再处理事件
#[test]
fn test_failed_session_stops_processing() {
    let builder = WiringBuilder::new().with_catalog(catalog()).with_manager(manager());
    let mut machine = DescriptorMachine::new(builder.session().unwrap());

    let events = MarkupTokenizer::new(
        r#"<wiring><dao class="com.example.dao.Missing"/><dao class="com.example.dao.OrderDaoImpl"/></wiring>"#,
    );
    let mut failures = 0;
    for event in events {
        if machine.feed(event).is_err() {
            failures += 1;
        }
    }

    assert_eq!(machine.state(), MachineState::Finished);
    assert!(failures >= 2);
    assert!(machine.handler().resolver().data_access().is_empty());
}
