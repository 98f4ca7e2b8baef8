use crate::analysis::StructDescriptor;

/// Local variable names tried, in order, for the value under construction
const VAR_CANDIDATES: [&str; 3] = ["s", "obj", "newcObj"];

/// One constructor parameter, mirroring a non-skipped field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorParam {
    /// Parameter name, equal to the field name
    pub name: String,
    /// Go type text
    pub ty: String,
}

/// Resolved shape of a `New<Type>` constructor
///
/// Built from a [`StructDescriptor`]; every string here is ready to be
/// pasted into Go source by the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorPlan {
    /// Struct being constructed
    pub struct_name: String,
    /// `New<Type>`
    pub func_name: String,
    /// Type parameter list copied from the struct, empty if not generic
    pub type_params: String,
    /// Parameters in field declaration order
    pub params: Vec<ConstructorParam>,
    /// Result clause: `*T`, `T`, `(*T, error)` or `(T, error)`
    pub return_type: String,
    /// Composite literal head: `&T`, `T` or `&T[K, V]`
    pub literal: String,
    /// Local holding the value while `init()` runs
    pub var_name: String,
    /// Call `init()` before returning
    pub init_mode: bool,
    /// `init()` returns an error that must be forwarded
    pub init_failable: bool,
    /// What to return alongside an `init()` error: `nil` or `T{}`
    pub zero_value: String,
    /// `init_mode` was requested but the type has no `init` method
    pub missing_init: bool,
}

impl ConstructorPlan {
    /// Derive the constructor shape for `descriptor`
    pub fn from_descriptor(descriptor: &StructDescriptor) -> Self {
        let name = descriptor.name.as_str();
        let instance = format!("{name}{}", descriptor.type_arguments);
        let params: Vec<ConstructorParam> = descriptor
            .fields
            .iter()
            .filter(|f| !f.skipped)
            .map(|f| ConstructorParam {
                name: f.name.clone(),
                ty: f.declared_type.clone(),
            })
            .collect();

        let (result, literal, zero_value) = if descriptor.value_mode {
            let zero = format!("{instance}{{}}");
            (instance.clone(), instance, zero)
        } else {
            (format!("*{instance}"), format!("&{instance}"), "nil".to_string())
        };
        let return_type = if descriptor.init_failable {
            format!("({result}, error)")
        } else {
            result
        };

        let var_name = pick_var_name(&params);

        Self {
            struct_name: name.to_string(),
            func_name: format!("New{name}"),
            type_params: descriptor.type_parameters.clone(),
            params,
            return_type,
            literal,
            var_name,
            init_mode: descriptor.init_mode,
            init_failable: descriptor.init_failable,
            zero_value,
            missing_init: descriptor.init_mode && !descriptor.has_init_method,
        }
    }

    /// Parameter list as written between the parentheses
    pub fn param_list(&self) -> String {
        self.params
            .iter()
            .map(|p| format!("{} {}", p.name, p.ty))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn pick_var_name(params: &[ConstructorParam]) -> String {
    let taken = |candidate: &str| params.iter().any(|p| p.name == candidate);
    if let Some(free) = VAR_CANDIDATES.iter().find(|c| !taken(c)) {
        return (*free).to_string();
    }
    (1..)
        .map(|n| format!("newcObj{n}"))
        .find(|c| !taken(c))
        .unwrap_or_else(|| "newcObj".to_string())
}
