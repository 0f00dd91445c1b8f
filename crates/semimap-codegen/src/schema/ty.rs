/// How a field type is laid out, read from its syntax.
///
/// `Option` and `Box` wrappers are looked through: they change nullability,
/// not layout.
#[derive(Debug)]
pub(crate) enum Shape {
    /// Anything else
    Scalar,

    /// `Vec<T>`, holding `T`
    Collection(syn::Type),

    /// `[T; N]`, holding `T`
    Array(syn::Type),

    /// `HashMap<String, T>`, `BTreeMap<String, T>` or `IndexMap<String, T>`,
    /// holding `T`
    Map(syn::Type),
}

impl Shape {
    pub(crate) fn of(ty: &syn::Type) -> Self {
        let ty = unwrap_optional(ty);

        if let syn::Type::Array(array) = ty {
            return Self::Array((*array.elem).clone());
        }

        let Some(segment) = last_segment(ty) else {
            return Self::Scalar;
        };

        let args = generic_args(segment);

        match (segment.ident.to_string().as_str(), &args[..]) {
            ("Vec", [item]) => Self::Collection((*item).clone()),
            ("HashMap" | "BTreeMap" | "IndexMap", [key, value, ..]) if is_string(key) => {
                Self::Map((*value).clone())
            }
            _ => Self::Scalar,
        }
    }

    pub(crate) fn element(&self) -> Option<&syn::Type> {
        match self {
            Self::Scalar => None,
            Self::Collection(ty) | Self::Array(ty) | Self::Map(ty) => Some(ty),
        }
    }
}

/// Strips `Option<..>` and `Box<..>` wrappers.
pub(crate) fn unwrap_optional(ty: &syn::Type) -> &syn::Type {
    let Some(segment) = last_segment(ty) else {
        return ty;
    };

    match (segment.ident.to_string().as_str(), &generic_args(segment)[..]) {
        ("Option" | "Box", [inner]) => unwrap_optional(*inner),
        _ => ty,
    }
}

fn last_segment(ty: &syn::Type) -> Option<&syn::PathSegment> {
    match ty {
        syn::Type::Path(path) if path.qself.is_none() => path.path.segments.last(),
        _ => None,
    }
}

fn generic_args(segment: &syn::PathSegment) -> Vec<&syn::Type> {
    let syn::PathArguments::AngleBracketed(args) = &segment.arguments else {
        return vec![];
    };

    args.args
        .iter()
        .filter_map(|arg| match arg {
            syn::GenericArgument::Type(ty) => Some(ty),
            _ => None,
        })
        .collect()
}

fn is_string(ty: &syn::Type) -> bool {
    last_segment(ty).is_some_and(|segment| segment.ident == "String")
}
