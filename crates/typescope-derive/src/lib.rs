/*!
Procedural macros for typescope.

`#[derive(Describe)]` implements `typescope::Describe` for structs and
fieldless enums. The generated `descriptor()` names the type after its
module path, and `register()` records its definition together with the
definitions of every type its fields mention.

Field and container metadata comes from `#[describe(...)]` attributes and,
where they overlap, from `#[serde(...)]` attributes:

| attribute                              | effect                                  |
|----------------------------------------|-----------------------------------------|
| `rename = "..."`                       | serialized name                         |
| `rename_all = "..."` (container)       | case convention for fields or variants  |
| `transient`, serde `skip`              | kept in the model, omitted at export    |
| `skip` (describe only)                 | excluded from the model                 |
| `optional`, serde `default`            | never required                          |
| `required`, `required = false`         | explicit required-ness                  |
| `flatten`                              | properties inherited from the field type|
| `description = "..."`, doc comments    | property or type description            |
*/

use proc_macro::TokenStream;
use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DataEnum, DeriveInput, Expr, ExprLit,
    Fields, GenericArgument, Ident, Lit, LitStr, Meta, PathArguments, Type,
};

/// Derive macro to implement `Describe` for structs and fieldless enums
#[proc_macro_derive(Describe, attributes(describe))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    generate_describe_impl(&input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

/// Generate the `Describe` implementation
fn generate_describe_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;
    let container = ContainerAttrs::parse(&input.attrs)?;
    let display = container.rename.clone().unwrap_or_else(|| name.to_string());
    let params: Vec<Ident> = input.generics.type_params().map(|p| p.ident.clone()).collect();

    let (descriptor, registration) = match &input.data {
        Data::Struct(data) => generate_struct(&display, &params, &data.fields, &container)?,
        Data::Enum(data) => generate_enum(&display, data, &container)?,
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "Describe cannot be derived for union types",
            ));
        }
    };

    let mut generics = input.generics.clone();
    for param in &params {
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(#param: ::typescope::Describe));
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::typescope::Describe for #name #ty_generics #where_clause {
            fn descriptor() -> ::typescope::TypeDescriptor {
                #descriptor
            }

            fn register(registry: &mut ::typescope::TypeRegistry) {
                #registration
            }
        }
    })
}

/// The `descriptor()` and `register()` bodies
type Generated = (TokenStream2, TokenStream2);

/// Registers the type arguments of this instantiation, then `definition`
/// once, then the types it mentions. The arguments come first because they
/// differ between instantiations of one generic while the definition is
/// shared. Registering the definition before recursing lets
/// self-referential types terminate.
fn register_body(
    display: &str,
    params: &[Ident],
    definition: TokenStream2,
    mentioned: &[TokenStream2],
) -> TokenStream2 {
    quote! {
        #(<#params as ::typescope::Describe>::register(registry);)*
        let qualified_name = concat!(module_path!(), "::", #display);
        if registry.contains(qualified_name) {
            return;
        }
        registry.register(#definition);
        #(#mentioned)*
    }
}

/// Descriptor, definition and registrations for a struct
fn generate_struct(
    display: &str,
    params: &[Ident],
    fields: &Fields,
    container: &ContainerAttrs,
) -> Result<Generated, syn::Error> {
    let qualified = quote!(concat!(module_path!(), "::", #display));

    // Newtypes are transparent
    if let Fields::Unnamed(unnamed) = fields {
        if unnamed.unnamed.len() != 1 {
            return Err(syn::Error::new_spanned(
                fields,
                "Describe can only be derived for tuple structs with exactly one field",
            ));
        }
        let inner = &unnamed.unnamed[0].ty;
        return Ok((
            quote!(<#inner as ::typescope::Describe>::descriptor()),
            quote!(<#inner as ::typescope::Describe>::register(registry);),
        ));
    }

    let descriptor = if params.is_empty() {
        quote!(::typescope::TypeDescriptor::class(#qualified))
    } else {
        quote! {
            ::typescope::TypeDescriptor::generic(
                #qualified,
                vec![#(<#params as ::typescope::Describe>::descriptor()),*],
            )
        }
    };

    let mut definition = quote!(::typescope::TypeDef::class(qualified_name));
    for param in params {
        let symbol = param.to_string();
        definition = quote!(#definition.type_param(#symbol));
    }
    if let Some(description) = &container.description {
        definition = quote!(#definition.described(#description));
    }

    let mut registrations = Vec::new();
    if let Fields::Named(named) = fields {
        for field in &named.named {
            let Some(ident) = &field.ident else { continue };
            if is_phantom(&field.ty) {
                continue;
            }

            let attrs = FieldAttrs::parse(&field.attrs)?;
            let field_ty = &field.ty;
            let walked = walk_type(field_ty, params);
            registrations.push(quote!(<#field_ty as ::typescope::Describe>::register(registry);));

            if attrs.flatten {
                definition = quote!(#definition.extends(#walked));
                continue;
            }

            let declared = ident.to_string().trim_start_matches("r#").to_string();
            let mut property = quote!(::typescope::PropertyDef::new(#declared, #walked));

            let serialized = attrs
                .rename
                .clone()
                .or_else(|| container.rename_all.map(|case| case.apply(&declared)));
            if let Some(serialized) = serialized.filter(|s| *s != declared) {
                property = quote!(#property.renamed(#serialized));
            }
            if attrs.skip {
                property = quote!(#property.private());
            }
            if attrs.transient {
                property = quote!(#property.transient());
            }
            if attrs.optional {
                property = quote!(#property.optional());
            }
            if let Some(required) = attrs.required {
                property = quote!(#property.required(#required));
            }
            if let Some(description) = &attrs.description {
                property = quote!(#property.described(#description));
            }

            definition = quote!(#definition.property(#property));
        }
    }

    Ok((descriptor, register_body(display, params, definition, &registrations)))
}

/// Descriptor and definition for a fieldless enum
fn generate_enum(
    display: &str,
    data: &DataEnum,
    container: &ContainerAttrs,
) -> Result<Generated, syn::Error> {
    let mut constants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Describe can only be derived for enums without variant fields",
            ));
        }
        let attrs = FieldAttrs::parse(&variant.attrs)?;
        if attrs.skip || attrs.transient {
            continue;
        }
        let declared = variant.ident.to_string();
        let constant = attrs
            .rename
            .or_else(|| container.rename_all.map(|case| case.apply(&declared)))
            .unwrap_or(declared);
        constants.push(constant);
    }

    let mut definition = quote! {
        ::typescope::TypeDef::enumeration(qualified_name, {
            let constants: &[&str] = &[#(#constants),*];
            constants.iter().copied()
        })
    };
    if let Some(description) = &container.description {
        definition = quote!(#definition.described(#description));
    }

    Ok((
        quote!(::typescope::TypeDescriptor::enumeration(concat!(module_path!(), "::", #display))),
        register_body(display, &[], definition, &[]),
    ))
}

/// Builds a descriptor expression that keeps the struct's own type
/// parameters symbolic, so `Vec<T>` becomes a list of parameter `T`.
fn walk_type(ty: &Type, params: &[Ident]) -> TokenStream2 {
    if !mentions_params(ty, params) {
        return quote!(<#ty as ::typescope::Describe>::descriptor());
    }

    match ty {
        Type::Paren(inner) => walk_type(&inner.elem, params),
        Type::Group(inner) => walk_type(&inner.elem, params),
        Type::Reference(reference) => walk_type(&reference.elem, params),
        Type::Array(array) => {
            let element = walk_type(&array.elem, params);
            quote!(::typescope::TypeDescriptor::array(#element))
        }
        Type::Slice(slice) => {
            let element = walk_type(&slice.elem, params);
            quote!(::typescope::TypeDescriptor::array(#element))
        }
        Type::Path(path) if path.qself.is_none() => {
            if let Some(ident) = path.path.get_ident() {
                let symbol = ident.to_string();
                return quote!(::typescope::TypeDescriptor::param(#symbol));
            }

            let Some(last) = path.path.segments.last() else {
                return unknown(ty);
            };
            let PathArguments::AngleBracketed(arguments) = &last.arguments else {
                return unknown(ty);
            };
            let type_args: Vec<&Type> = arguments
                .args
                .iter()
                .filter_map(|arg| match arg {
                    GenericArgument::Type(ty) => Some(ty),
                    _ => None,
                })
                .collect();

            match last.ident.to_string().as_str() {
                "Option" if type_args.len() == 1 => {
                    let inner = walk_type(type_args[0], params);
                    quote!(#inner.nullable())
                }
                "Box" | "Arc" | "Rc" if type_args.len() == 1 => walk_type(type_args[0], params),
                _ => {
                    // `Path<TypeParam, ..>` supplies the classifier and raw
                    // name; the walked arguments replace the stand-ins.
                    let mut erased = path.path.clone();
                    if let Some(segment) = erased.segments.last_mut() {
                        if let PathArguments::AngleBracketed(args) = &mut segment.arguments {
                            for arg in args.args.iter_mut() {
                                if let GenericArgument::Type(ty) = arg {
                                    *ty = parse_quote!(::typescope::describe::TypeParam);
                                }
                            }
                        }
                    }
                    let walked: Vec<TokenStream2> =
                        type_args.iter().map(|ty| walk_type(ty, params)).collect();
                    quote! {
                        <#erased as ::typescope::Describe>::descriptor()
                            .with_arguments(vec![#(#walked),*])
                    }
                }
            }
        }
        _ => unknown(ty),
    }
}

fn unknown(ty: &Type) -> TokenStream2 {
    let rendered = quote!(#ty).to_string();
    quote!(::typescope::TypeDescriptor::unknown(#rendered))
}

fn mentions_params(ty: &Type, params: &[Ident]) -> bool {
    fn scan(tokens: TokenStream2, params: &[Ident]) -> bool {
        tokens.into_iter().any(|token| match token {
            TokenTree::Ident(ident) => params.iter().any(|p| *p == ident),
            TokenTree::Group(group) => scan(group.stream(), params),
            _ => false,
        })
    }
    !params.is_empty() && scan(quote!(#ty), params)
}

fn is_phantom(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == "PhantomData")
            .unwrap_or(false),
        _ => false,
    }
}

/// Container-level attributes
#[derive(Default)]
struct ContainerAttrs {
    rename: Option<String>,
    rename_all: Option<RenameRule>,
    description: Option<String>,
}

impl ContainerAttrs {
    fn parse(attrs: &[Attribute]) -> Result<Self, syn::Error> {
        let mut parsed = ContainerAttrs {
            description: doc_comment(attrs),
            ..Default::default()
        };

        for attr in attrs {
            let strict = attr.path().is_ident("describe");
            if !strict && !attr.path().is_ident("serde") {
                continue;
            }
            if !matches!(attr.meta, Meta::List(_)) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") && meta.input.peek(syn::Token![=]) {
                    parsed.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if meta.path.is_ident("rename_all") && meta.input.peek(syn::Token![=]) {
                    let rule: LitStr = meta.value()?.parse()?;
                    parsed.rename_all = Some(
                        RenameRule::parse(&rule.value())
                            .ok_or_else(|| syn::Error::new_spanned(&rule, "unknown rename_all rule"))?,
                    );
                } else if strict && meta.path.is_ident("description") {
                    parsed.description = Some(meta.value()?.parse::<LitStr>()?.value());
                } else if strict {
                    return Err(meta.error("unsupported describe attribute"));
                } else {
                    skip_meta_value(&meta)?;
                }
                Ok(())
            })?;
        }

        Ok(parsed)
    }
}

/// Field- and variant-level attributes
#[derive(Default)]
struct FieldAttrs {
    rename: Option<String>,
    transient: bool,
    skip: bool,
    optional: bool,
    required: Option<bool>,
    flatten: bool,
    description: Option<String>,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> Result<Self, syn::Error> {
        let mut parsed = FieldAttrs {
            description: doc_comment(attrs),
            ..Default::default()
        };

        for attr in attrs {
            if attr.path().is_ident("describe") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        parsed.rename = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else if meta.path.is_ident("transient") {
                        parsed.transient = true;
                    } else if meta.path.is_ident("skip") {
                        parsed.skip = true;
                    } else if meta.path.is_ident("optional") {
                        parsed.optional = true;
                    } else if meta.path.is_ident("required") {
                        let required = if meta.input.peek(syn::Token![=]) {
                            meta.value()?.parse::<syn::LitBool>()?.value
                        } else {
                            true
                        };
                        parsed.required = Some(required);
                    } else if meta.path.is_ident("flatten") {
                        parsed.flatten = true;
                    } else if meta.path.is_ident("description") {
                        parsed.description = Some(meta.value()?.parse::<LitStr>()?.value());
                    } else {
                        return Err(meta.error("unsupported describe attribute"));
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") && matches!(attr.meta, Meta::List(_)) {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") && meta.input.peek(syn::Token![=]) {
                        let rename = meta.value()?.parse::<LitStr>()?.value();
                        parsed.rename.get_or_insert(rename);
                    } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                        parsed.transient = true;
                    } else if meta.path.is_ident("default") || meta.path.is_ident("skip_serializing_if") {
                        parsed.optional = true;
                        skip_meta_value(&meta)?;
                    } else if meta.path.is_ident("flatten") {
                        parsed.flatten = true;
                    } else {
                        skip_meta_value(&meta)?;
                    }
                    Ok(())
                })?;
            }
        }

        Ok(parsed)
    }
}

/// Consumes `= value` or `(...)` after a serde key this macro ignores
fn skip_meta_value(meta: &syn::meta::ParseNestedMeta) -> Result<(), syn::Error> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<TokenStream2>()?;
    }
    Ok(())
}

/// Joins `///` lines into a single description
fn doc_comment(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    let joined = lines.join("\n").trim().to_string();
    (!joined.is_empty()).then_some(joined)
}

/// Case conventions accepted by `rename_all`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn parse(rule: &str) -> Option<Self> {
        Some(match rule {
            "lowercase" => RenameRule::Lower,
            "UPPERCASE" => RenameRule::Upper,
            "PascalCase" => RenameRule::Pascal,
            "camelCase" => RenameRule::Camel,
            "snake_case" => RenameRule::Snake,
            "SCREAMING_SNAKE_CASE" => RenameRule::ScreamingSnake,
            "kebab-case" => RenameRule::Kebab,
            "SCREAMING-KEBAB-CASE" => RenameRule::ScreamingKebab,
            _ => return None,
        })
    }

    /// Applies the rule to a `snake_case` field or `PascalCase` variant name
    fn apply(self, name: &str) -> String {
        let words = split_words(name);
        let capitalize = |word: &str| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        };

        match self {
            RenameRule::Lower => name.to_lowercase(),
            RenameRule::Upper => name.to_uppercase(),
            RenameRule::Pascal => words.iter().map(|w| capitalize(w)).collect(),
            RenameRule::Camel => words
                .iter()
                .enumerate()
                .map(|(i, w)| if i == 0 { w.clone() } else { capitalize(w) })
                .collect(),
            RenameRule::Snake => words.join("_"),
            RenameRule::ScreamingSnake => words.join("_").to_uppercase(),
            RenameRule::Kebab => words.join("-"),
            RenameRule::ScreamingKebab => words.join("-").to_uppercase(),
        }
    }
}

/// Lowercase words of a snake_case or PascalCase identifier
fn split_words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in name.chars() {
        if ch == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
            current.extend(ch.to_lowercase());
        } else {
            current.extend(ch.to_lowercase());
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}
