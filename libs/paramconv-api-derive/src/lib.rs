use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse_macro_input, Data, DeriveInput, Fields, GenericArgument, Ident, LitStr,
    PathArguments, Type,
};

/// Derive macro for converter config parameter declarations.
///
/// Generates two methods on the annotated struct:
///
/// - `config_params() -> Vec<ConfigParam>`: declarations the registry validates against.
/// - `from_config(&ConfigValues) -> Result<Self, ConverterError>`: reads typed values.
///
/// The struct must implement `Default` (defaults are used for non-required params).
///
/// # Example
///
/// ```ignore
/// #[derive(ConfigParams)]
/// pub struct StringToIntConfig {
///     #[param(description = "Numeric base")]
///     pub radix: u64,
///
///     #[param(required, description = "Accepted literals")]
///     pub truthy: Vec<String>,
/// }
/// ```
///
/// Supported field types: `bool`, `i64`, `u64`, `usize`, `f64`, `String`, `Vec<String>`.
#[proc_macro_derive(ConfigParams, attributes(param))]
pub fn derive_config_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// How a supported field type maps onto `ParamType` / `ConfigValues`.
struct FieldKind {
    param_type: TokenStream2,
    /// Wraps `__defaults.<field>` into a `ParamValue`.
    default_value: TokenStream2,
    /// Typed getter on `ConfigValues`, e.g. `get_u64`.
    getter: TokenStream2,
    /// Turns the getter's output `v` into the field value.
    read: TokenStream2,
}

fn field_kind(field_name: &Ident, ty: &Type) -> Result<FieldKind, syn::Error> {
    let ty_name = type_ident_name(ty)
        .ok_or_else(|| syn::Error::new_spanned(ty, "unsupported type for ConfigParams"))?;

    let kind = match ty_name.as_str() {
        "u64" => FieldKind {
            param_type: quote! { paramconv_api::config::ParamType::U64 },
            default_value: quote! { paramconv_api::config::ParamValue::U64(__defaults.#field_name) },
            getter: quote! { get_u64 },
            read: quote! { v },
        },
        "usize" => FieldKind {
            param_type: quote! { paramconv_api::config::ParamType::U64 },
            default_value: quote! { paramconv_api::config::ParamValue::U64(__defaults.#field_name as u64) },
            getter: quote! { get_u64 },
            read: quote! { v as usize },
        },
        "i64" => FieldKind {
            param_type: quote! { paramconv_api::config::ParamType::I64 },
            default_value: quote! { paramconv_api::config::ParamValue::I64(__defaults.#field_name) },
            getter: quote! { get_i64 },
            read: quote! { v },
        },
        "f64" => FieldKind {
            param_type: quote! { paramconv_api::config::ParamType::F64 },
            default_value: quote! { paramconv_api::config::ParamValue::F64(__defaults.#field_name) },
            getter: quote! { get_f64 },
            read: quote! { v },
        },
        "bool" => FieldKind {
            param_type: quote! { paramconv_api::config::ParamType::Bool },
            default_value: quote! { paramconv_api::config::ParamValue::Bool(__defaults.#field_name) },
            getter: quote! { get_bool },
            read: quote! { v },
        },
        "String" => FieldKind {
            param_type: quote! { paramconv_api::config::ParamType::Str },
            default_value: quote! { paramconv_api::config::ParamValue::Str(__defaults.#field_name.clone()) },
            getter: quote! { get_str },
            read: quote! { v.to_string() },
        },
        "Vec" if vec_of_string(ty) => FieldKind {
            param_type: quote! { paramconv_api::config::ParamType::StrList },
            default_value: quote! { paramconv_api::config::ParamValue::StrList(__defaults.#field_name.clone()) },
            getter: quote! { get_str_list },
            read: quote! { v.to_vec() },
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ty,
                format!(
                    "unsupported type '{ty_name}' (expected u64, i64, f64, bool, String, usize, Vec<String>)"
                ),
            ))
        }
    };
    Ok(kind)
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "ConfigParams only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "ConfigParams only supports structs",
            ))
        }
    };

    let mut config_param_tokens = Vec::new();
    let mut from_config_tokens = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let field_name_str = field_name.to_string();

        // Parse #[param(...)] attribute.
        let mut description_str: Option<String> = None;
        let mut required = false;

        for attr in &field.attrs {
            if !attr.path().is_ident("param") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("description") {
                    let value: LitStr = meta.value()?.parse()?;
                    description_str = Some(value.value());
                    Ok(())
                } else if meta.path.is_ident("required") {
                    required = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown param attribute (expected description or required)"))
                }
            })?;
        }

        let description_str = description_str.ok_or_else(|| {
            syn::Error::new_spanned(field_name, "missing #[param(description = \"...\")]")
        })?;

        let FieldKind {
            param_type,
            default_value,
            getter,
            read,
        } = field_kind(field_name, &field.ty)?;

        let default_tokens = if required {
            quote! { None }
        } else {
            quote! { Some(#default_value) }
        };

        config_param_tokens.push(quote! {
            paramconv_api::config::ConfigParam {
                name: #field_name_str.to_string(),
                param_type: #param_type,
                required: #required,
                default: #default_tokens,
                description: #description_str.to_string(),
            }
        });

        from_config_tokens.push(if required {
            quote! {
                let v = __config.#getter(#field_name_str).ok_or_else(|| {
                    paramconv_api::error::ConverterError::config(
                        format!("missing required parameter '{}'", #field_name_str)
                    )
                })?;
                result.#field_name = #read;
            }
        } else {
            quote! {
                if let Some(v) = __config.#getter(#field_name_str) {
                    result.#field_name = #read;
                }
            }
        });
    }

    Ok(quote! {
        impl #name {
            pub fn config_params() -> Vec<paramconv_api::config::ConfigParam> {
                let __defaults = Self::default();
                vec![
                    #(#config_param_tokens),*
                ]
            }

            pub fn from_config(
                __config: &paramconv_api::config::ConfigValues,
            ) -> Result<Self, paramconv_api::error::ConverterError> {
                let mut result = Self::default();
                #(#from_config_tokens)*
                Ok(result)
            }
        }
    })
}

/// Extract the last path segment ident name from a type (e.g. `u64`, `String`).
fn type_ident_name(ty: &Type) -> Option<String> {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .map(|seg| seg.ident.to_string())
    } else {
        None
    }
}

/// `Vec<String>`, the only supported generic.
fn vec_of_string(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    let Some(seg) = type_path.path.segments.last() else {
        return false;
    };
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return false;
    };
    matches!(
        args.args.first(),
        Some(GenericArgument::Type(inner)) if type_ident_name(inner).as_deref() == Some("String")
    )
}
