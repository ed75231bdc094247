//! Runtime Library Interface
//!
//! Generated C code links against the `DIESEL.h` runtime. The front end never
//! calls into it; it only has to agree with it on the fixed-width type names
//! and sizes, and later phases need the primitive signatures. Both live here.

use std::collections::HashMap;

use crate::frontend::token::TokenKind;

/// What a runtime primitive is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Allocate,
    Free,
    ListAdd,
    ListRemove,
    StringLength,
    StringCopy,
    StringCompare,
    StringConcat,
    /// Formatted output
    Output,
    /// Prompted line input
    Input,
    /// Abort with a message
    Crash,
}

/// Signature of one runtime primitive
#[derive(Debug, Clone)]
pub struct RuntimeFunc {
    pub capability: Capability,
    /// C function name to generate
    pub c_name: String,
    pub params: Vec<(String, String)>,
    pub ret_type: String,
    /// Whether this function is variadic (like printf)
    pub variadic: bool,
}

/// C-side counterpart of a scalar type keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeType {
    pub keyword: TokenKind,
    pub c_name: &'static str,
    /// `sizeof` of the C type; 0 for types the front end sizes later
    pub byte_size: u8,
    pub signed: bool,
}

const fn ty(keyword: TokenKind, c_name: &'static str, byte_size: u8, signed: bool) -> RuntimeType {
    RuntimeType { keyword, c_name, byte_size, signed }
}

/// Fixed-width typedefs of the runtime header
pub static RUNTIME_TYPES: &[RuntimeType] = &[
    ty(TokenKind::UInt4, "DSL_uint8", 1, false),
    ty(TokenKind::UInt8, "DSL_uint8", 1, false),
    ty(TokenKind::UInt16, "DSL_uint16", 2, false),
    ty(TokenKind::UInt32, "DSL_uint32", 4, false),
    ty(TokenKind::UInt64, "DSL_uint64", 8, false),
    ty(TokenKind::Int4, "DSL_int8", 1, true),
    ty(TokenKind::Int8, "DSL_int8", 1, true),
    ty(TokenKind::Int16, "DSL_int16", 2, true),
    ty(TokenKind::Int32, "DSL_int32", 4, true),
    ty(TokenKind::Int64, "DSL_int64", 8, true),
    ty(TokenKind::Float32, "DSL_float32", 4, true),
    ty(TokenKind::Float64, "DSL_float64", 8, true),
    ty(TokenKind::Char, "char", 1, false),
    ty(TokenKind::Bool, "_Bool", 1, false),
    ty(TokenKind::String, "char*", 0, false),
];

/// The interface generated code depends on
pub trait RuntimeLibrary {
    /// Header generated C sources include
    fn header(&self) -> &str;

    /// Signature of the primitive providing `capability`
    fn primitive(&self, capability: Capability) -> Option<&RuntimeFunc>;

    /// C type a scalar type keyword lowers to; `None` for `inherit` and non-types
    fn type_for(&self, keyword: TokenKind) -> Option<&RuntimeType>;
}

/// Registry of the `DIESEL.h` runtime
pub struct RuntimeRegistry {
    functions: HashMap<Capability, RuntimeFunc>,
}

impl RuntimeRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            functions: HashMap::new(),
        };
        registry.register_all();
        registry
    }

    fn register_all(&mut self) {
        use Capability::*;

        // Memory
        self.register(Allocate, "DSL_Allocate", &[("ptr", "void**"), ("type", "type")], "void", false);
        self.register(Free, "DSL_Free", &[("ptr", "void*")], "void", false);

        // Lists
        self.register(
            ListAdd,
            "DSL_ListAdd",
            &[("list", "void*"), ("size", "size_t*"), ("item", "void*"), ("item_size", "size_t")],
            "void*",
            false,
        );
        self.register(
            ListRemove,
            "DSL_ListRemove",
            &[("list", "void*"), ("size", "size_t*"), ("index", "size_t"), ("item_size", "size_t")],
            "void*",
            false,
        );

        // Strings
        self.register(StringLength, "DSL_StringLength", &[("str", "const char*")], "size_t", false);
        self.register(StringCopy, "DSL_StringCopy", &[("str", "const char*")], "char*", false);
        self.register(
            StringCompare,
            "DSL_StringCompare",
            &[("str1", "const char*"), ("str2", "const char*")],
            "int",
            false,
        );
        self.register(
            StringConcat,
            "DSL_StringConcat",
            &[("dest", "char*"), ("src", "const char*")],
            "void",
            false,
        );

        // I/O and process control
        self.register(Output, "DSL_Out", &[("format", "const char*")], "void", true);
        self.register(Input, "DSL_In", &[("prompt", "const char*")], "char*", false);
        self.register(Crash, "DSL_Crash_And_Burn", &[("message", "const char*")], "void", false);
    }

    fn register(
        &mut self,
        capability: Capability,
        c_name: &str,
        params: &[(&str, &str)],
        ret_type: &str,
        variadic: bool,
    ) {
        self.functions.insert(
            capability,
            RuntimeFunc {
                capability,
                c_name: c_name.to_string(),
                params: params
                    .iter()
                    .map(|(name, ty)| (name.to_string(), ty.to_string()))
                    .collect(),
                ret_type: ret_type.to_string(),
                variadic,
            },
        );
    }

    /// Get all primitives
    pub fn all(&self) -> impl Iterator<Item = &RuntimeFunc> {
        self.functions.values()
    }
}

impl RuntimeLibrary for RuntimeRegistry {
    fn header(&self) -> &str {
        "DIESEL.h"
    }

    fn primitive(&self, capability: Capability) -> Option<&RuntimeFunc> {
        self.functions.get(&capability)
    }

    fn type_for(&self, keyword: TokenKind) -> Option<&RuntimeType> {
        RUNTIME_TYPES.iter().find(|t| t.keyword == keyword)
    }
}

impl Default for RuntimeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::token::TOKEN_TABLE;

    #[test]
    fn type_keywords_agree_with_runtime_typedefs() {
        let runtime = RuntimeRegistry::new();
        for row in TOKEN_TABLE.iter().filter(|p| p.descriptor.is_some()) {
            let descriptor = row.descriptor.unwrap();
            match runtime.type_for(row.kind) {
                Some(ty) => {
                    assert_eq!(ty.byte_size, descriptor.byte_size, "{}", row.pattern);
                    assert_eq!(ty.signed, descriptor.signed, "{}", row.pattern);
                }
                None => assert_eq!(row.kind, TokenKind::Inherit),
            }
        }
    }

    #[test]
    fn only_type_keywords_lower_to_c() {
        let runtime = RuntimeRegistry::new();
        assert_eq!(runtime.type_for(TokenKind::Int32).map(|t| t.c_name), Some("DSL_int32"));
        assert_eq!(runtime.type_for(TokenKind::Float64).map(|t| t.c_name), Some("DSL_float64"));
        assert!(runtime.type_for(TokenKind::Inherit).is_none());
        assert!(runtime.type_for(TokenKind::Var).is_none());
        assert!(RUNTIME_TYPES.iter().all(|t| t.keyword.is_type()));
    }

    #[test]
    fn every_capability_is_registered() {
        let runtime = RuntimeRegistry::default();
        assert_eq!(runtime.all().count(), 11);
        assert_eq!(runtime.header(), "DIESEL.h");

        let out = runtime.primitive(Capability::Output).unwrap();
        assert_eq!(out.c_name, "DSL_Out");
        assert!(out.variadic);

        let crash = runtime.primitive(Capability::Crash).unwrap();
        assert_eq!(crash.c_name, "DSL_Crash_And_Burn");
        assert_eq!(crash.params.len(), 1);
        assert!(runtime.all().all(|f| runtime.primitive(f.capability).is_some()));
    }
}
