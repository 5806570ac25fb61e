//! Top-level declarations: global fields, struct definitions and methods.
//!
//! Each form is tried in that order at every position. A form that does
//! not match rewinds; the loop ends at the first position where none does.

use pcc_ir::{FieldDecl, GlobalField, Item, ItemKind, Method, Modifiers, Param, StructDef};

use crate::Parser;

const PARAM_STOPS: &[&str] = &[")", ";", "}"];

impl Parser<'_> {
    pub(crate) fn parse_items(&mut self) -> Vec<Item> {
        let mut items = Vec::new();
        while let Some(item) = self.parse_item() {
            items.push(item);
        }
        items
    }

    fn parse_item(&mut self) -> Option<Item> {
        if let Some(item) = self.try_parse(Self::parse_global_field) {
            return Some(item);
        }
        if let Some(item) = self.try_parse(Self::parse_struct) {
            return Some(item);
        }
        self.parse_method()
    }

    fn item(&self, kind: ItemKind, modifiers: Modifiers) -> Item {
        Item {
            kind,
            file: self.cursor.file(),
            modifiers,
        }
    }

    /// `public` or `private`; neither means private.
    fn parse_visibility(&mut self) -> Modifiers {
        if self.eat_keyword("public") {
            Modifiers::PUBLIC
        } else {
            self.eat_keyword("private");
            Modifiers::empty()
        }
    }

    fn parse_global_field(&mut self) -> Option<Item> {
        let mark = self.mark();
        let mut modifiers = self.parse_visibility();
        if self.eat_keyword("const") {
            modifiers |= Modifiers::CONST;
        }
        let (ty, name, init) = self.parse_declaration()?;
        let const_value = if modifiers.contains(Modifiers::CONST) {
            let folded = init.and_then(|init| self.arena.fold_int(init));
            if folded.is_none() {
                self.cursor.error(
                    format!("Constant field '{name}' not initialized with constant value"),
                    false,
                    &[],
                );
            }
            folded
        } else {
            None
        };
        let field = GlobalField {
            name,
            ty,
            init,
            const_value,
            mark,
        };
        Some(self.item(ItemKind::Global(field), modifiers))
    }

    fn parse_struct(&mut self) -> Option<Item> {
        let mark = self.mark();
        let modifiers = self.parse_visibility();
        if !self.eat_keyword("struct") {
            return None;
        }
        let name = match self.cursor.take_ident() {
            Some(name) => name,
            None => {
                self.cursor
                    .error("Expected identifier", true, &[" ", "\n", "\r"]);
                String::new()
            }
        };
        if !self.eat("{") {
            self.cursor.error("Expected opening brace", true, &["{", "}"]);
        }
        let mut fields = Vec::new();
        while let Some(ty) = self.parse_type() {
            let field_mark = self.mark();
            let field_name = self.cursor.take_ident();
            if field_name.is_none() || !self.eat(";") {
                self.cursor.error("Expected semicolon", false, &[";", "}"]);
                self.eat(";");
            }
            if let Some(name) = field_name {
                fields.push(FieldDecl {
                    ty,
                    name,
                    mark: field_mark,
                });
            }
        }
        if !self.eat("}") {
            self.cursor.error("Expected closing brace", true, &[";", "}"]);
        }
        self.eat(";");
        let def = StructDef { name, fields, mark };
        Some(self.item(ItemKind::Struct(def), modifiers))
    }

    /// `[public] [extern] Ret name ( params ) (body | ;)`.
    ///
    /// Everything up to the `(` is speculative. After it the declaration is
    /// committed: a missing `)` is reported and ends the item list.
    fn parse_method(&mut self) -> Option<Item> {
        let start = self.snapshot();
        let mark = self.mark();
        let mut modifiers = self.parse_visibility();
        if self.eat_keyword("extern") {
            modifiers |= Modifiers::EXTERN;
        }
        let header = self.parse_type().and_then(|ret| {
            let name = self.cursor.take_ident()?;
            self.eat("(").then_some((ret, name))
        });
        let Some((ret, name)) = header else {
            self.restore(start);
            return None;
        };

        let params = self.parse_params();
        if !self.eat(")") {
            self.cursor
                .error("Expected closing parentheses", false, &[";", "}"]);
            return None;
        }
        let body = if self.eat(";") {
            None
        } else {
            let body = self.parse_line();
            if body.is_none() {
                self.cursor
                    .error("Expected method body or semicolon", false, &[]);
            }
            body
        };
        let method = Method {
            name,
            ret,
            params,
            body,
            mark,
        };
        Some(self.item(ItemKind::Method(method), modifiers))
    }

    fn parse_params(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        loop {
            let Some(ty) = self.parse_type() else {
                if !params.is_empty() {
                    self.cursor.error("Expected type", false, PARAM_STOPS);
                }
                break;
            };
            let name = match ty.variable_name() {
                Some(name) => Some(name.to_string()),
                None => self.cursor.take_ident(),
            };
            let name = name.unwrap_or_else(|| {
                self.cursor.error("Expected identifier", false, PARAM_STOPS);
                String::new()
            });
            params.push(Param { ty, name });
            if !self.eat(",") {
                break;
            }
        }
        params
    }
}

