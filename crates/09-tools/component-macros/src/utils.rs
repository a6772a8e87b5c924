//! 宏工具函数

use syn::{Attribute, Expr, Field, Lit, LitStr, Result, Type};

/// 检查类型是否为 Injected<T>
pub fn is_injected_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == "Injected")
            .unwrap_or(false),
        _ => false,
    }
}

/// 读取字段上的 #[inject(...)] 属性
///
/// 支持 `#[inject("a.b.Capability")]` 和 `#[inject(capability = "a.b.Capability")]` 两种写法。
pub fn parse_inject_attribute(field: &Field) -> Result<Option<LitStr>> {
    let Some(attr) = field.attrs.iter().find(|attr| attr.path().is_ident("inject")) else {
        return Ok(None);
    };
    capability_from_attribute(attr).map(Some)
}

fn capability_from_attribute(attr: &Attribute) -> Result<LitStr> {
    if let Ok(lit) = attr.parse_args::<LitStr>() {
        return Ok(lit);
    }

    let mut capability = None;
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("capability") {
            let value: Expr = meta.value()?.parse()?;
            if let Expr::Lit(expr_lit) = value {
                if let Lit::Str(lit_str) = expr_lit.lit {
                    capability = Some(lit_str);
                    return Ok(());
                }
            }
            return Err(meta.error("capability 必须是字符串字面量"));
        }
        Err(meta.error("未知的 inject 参数"))
    })?;

    capability.ok_or_else(|| syn::Error::new_spanned(attr, "inject 属性缺少能力接口名称"))
}

/// 读取 #[service(name = "...")] 中的服务名称
pub fn parse_service_name(attrs: &[Attribute]) -> Result<Option<LitStr>> {
    let mut name = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("service")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("未知的 service 参数"))
            }
        })?;
    }
    Ok(name)
}
