//! Type identifiers: `int`, `void`, struct names, pointer stars and
//! function-pointer declarators `Ret (*name)(Params...)`.

use pcc_ir::{FunctionPointer, StructRef, Type};

use crate::Parser;

impl Parser<'_> {
    /// Parse a type. `None` (without errors) when no identifier is here.
    pub(crate) fn parse_type(&mut self) -> Option<Type> {
        let mark = self.mark();
        let name = self.cursor.take_ident()?;
        let base = match name.as_str() {
            "void" => Type::Void,
            "int" => Type::Int,
            _ => Type::Struct(StructRef { name, mark }),
        };
        Some(self.parse_type_suffix(base))
    }

    /// Pointer stars, then an optional function-pointer declarator which
    /// may itself be followed by more suffixes.
    fn parse_type_suffix(&mut self, mut ty: Type) -> Type {
        while self.eat("*") {
            ty = ty.pointer_to();
        }
        match self.try_parse(|p| p.parse_function_pointer(ty.clone())) {
            Some(fp) => self.parse_type_suffix(fp),
            None => ty,
        }
    }

    fn parse_function_pointer(&mut self, ret: Type) -> Option<Type> {
        let mark = self.mark();
        if !self.eat("(") || !self.eat("*") {
            return None;
        }
        let name = self.cursor.take_ident()?;
        if !self.eat(")") || !self.eat("(") {
            return None;
        }
        let mut params = Vec::new();
        loop {
            match self.parse_type() {
                Some(param) => params.push(param),
                None if params.is_empty() => break,
                None => return None,
            }
            if !self.eat(",") {
                break;
            }
        }
        if !self.eat(")") {
            return None;
        }
        Some(Type::FunctionPointer(Box::new(FunctionPointer {
            ret,
            name,
            params,
            mark,
        })))
    }
}
