//! 服务注入契约派生宏实现

use crate::utils::{is_injected_type, parse_inject_attribute, parse_service_name};
use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Result};

/// 一个注入点
struct InjectField {
    ident: Ident,
    capability: LitStr,
}

/// 实现 #[derive(Service)] 宏
pub fn derive_service_impl(input: DeriveInput) -> TokenStream {
    match expand_service(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(e) => e.to_compile_error().into(),
    }
}

/// 实现 #[derive(DataAccess)] 宏
pub fn derive_data_access_impl(input: DeriveInput) -> TokenStream {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::wiring_common::DataAccess for #struct_name #ty_generics #where_clause {}
    };

    TokenStream::from(expanded)
}

fn expand_service(input: &DeriveInput) -> Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = collect_inject_fields(input)?;

    let service_name = match parse_service_name(&input.attrs)? {
        Some(name) => quote! { #name },
        None => quote! { ::std::any::type_name::<Self>() },
    };

    let points = fields.iter().map(|field| {
        let field_name = field.ident.to_string();
        let capability = &field.capability;
        quote! {
            ::wiring_common::InjectionPoint::new(#field_name, #capability)
        }
    });

    let arms = fields.iter().map(|field| {
        let ident = &field.ident;
        let field_name = ident.to_string();
        quote! {
            #field_name => self.#ident.fill(#service_name, point, component),
        }
    });

    Ok(quote! {
        impl #impl_generics ::wiring_common::Service for #struct_name #ty_generics #where_clause {
            fn injection_points(&self) -> ::std::vec::Vec<::wiring_common::InjectionPoint> {
                ::std::vec![#(#points),*]
            }

            fn inject(
                &self,
                point: &::wiring_common::InjectionPoint,
                component: &::wiring_common::ComponentRef,
            ) -> ::wiring_common::DependencyResult<()> {
                let _ = component;
                match point.field() {
                    #(#arms)*
                    other => ::std::result::Result::Err(
                        ::wiring_common::DependencyError::InjectionRejected {
                            service: ::std::string::ToString::to_string(#service_name),
                            field: ::std::string::ToString::to_string(other),
                            capability: ::std::string::ToString::to_string(point.capability()),
                            message: ::std::string::ToString::to_string("服务没有声明该注入点"),
                        },
                    ),
                }
            }
        }
    })
}

fn collect_inject_fields(input: &DeriveInput) -> Result<Vec<InjectField>> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "#[derive(Service)] 只能用于结构体",
        ));
    };

    let named = match &data.fields {
        Fields::Named(named) => named.named.iter().collect::<Vec<_>>(),
        Fields::Unit => Vec::new(),
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input.ident,
                "#[derive(Service)] 需要具名字段",
            ))
        }
    };

    let mut fields = Vec::new();
    for field in named {
        let Some(capability) = parse_inject_attribute(field)? else {
            continue;
        };
        if !is_injected_type(&field.ty) {
            return Err(syn::Error::new_spanned(
                &field.ty,
                "#[inject] 字段的类型必须是 Injected<dyn Trait>",
            ));
        }
        if capability.value().trim().is_empty() {
            return Err(syn::Error::new_spanned(&capability, "能力接口名称不能为空"));
        }
        let ident = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "注入字段必须具名"))?;
        fields.push(InjectField { ident, capability });
    }
    Ok(fields)
}
