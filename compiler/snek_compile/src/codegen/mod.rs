//! AST → bytecode lowering.
//!
//! [`CodeGen`] walks the program with the [`Resolution`] in hand and emits
//! into a [`CodeBuilder`]. Each lambda gets its own builder and becomes a
//! nested [`CompiledCode`] referenced from a `LoadFunction`.
//!
//! Declarations lower in source order: namespaces become `MakeNamespace`,
//! types `MakeType`, bindings "evaluate block, then save pattern".

mod control_flow;
mod expr;
mod patterns;

use snek_ir::{
    Decl, Declaration, ImportStmt, NamePattern, NamespaceDecl, Program, TypeDecl,
};

use crate::resolver::{Resolution, Resolver};
use crate::{CaseSpec, CodeBuilder, CompileError, CompiledCode, OpCode};

/// Knobs for [`compile_with`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Publish root-level bindings into the root namespace even without
    /// `public`. The REPL sets this so later lines can see earlier ones.
    pub publish_root_bindings: bool,
}

/// Compile a whole program with default options.
pub fn compile(program: &Program) -> Result<CompiledCode, CompileError> {
    compile_with(program, CompileOptions::default())
}

pub fn compile_with(
    program: &Program,
    options: CompileOptions,
) -> Result<CompiledCode, CompileError> {
    let resolution = Resolver::resolve(program);
    let gen = CodeGen {
        resolution: &resolution,
        options,
    };

    let mut code = CodeBuilder::new();
    for import in &program.imports {
        gen.import(import, &mut code);
    }
    gen.namespace_body(&program.root, &[], &mut code)?;
    if let Some(call) = &program.expr {
        gen.call(call, false, &mut code)?;
    }

    let code = code.finish()?;
    tracing::debug!(
        instructions = code.len(),
        links = resolution.len(),
        "compiled unit"
    );
    Ok(code)
}

pub(crate) struct CodeGen<'a> {
    resolution: &'a Resolution,
    options: CompileOptions,
}

impl CodeGen<'_> {
    fn declaration(&self, leaf: &NamePattern) -> Result<Declaration, CompileError> {
        self.resolution
            .get(leaf.id)
            .cloned()
            .ok_or_else(|| CompileError::UnknownDeclaration {
                name: leaf.name.clone(),
                line: leaf.line,
            })
    }

    /// One `ImportSelected` per requested name.
    fn import(&self, import: &ImportStmt, code: &mut CodeBuilder) {
        if import.is_import_all() {
            code.emit(import.line, OpCode::ImportAll(import.filename.clone()));
            return;
        }
        for name in &import.names {
            code.emit(
                import.line,
                OpCode::ImportSelected {
                    filename: import.filename.clone(),
                    path: name.parts.clone(),
                },
            );
        }
    }

    fn namespace(
        &self,
        ns: &NamespaceDecl,
        parent: &[String],
        code: &mut CodeBuilder,
    ) -> Result<(), CompileError> {
        let path = [parent, ns.name.parts.as_slice()].concat();
        code.emit(
            ns.name.line,
            OpCode::MakeNamespace {
                path: path.clone(),
                public: ns.public,
            },
        );
        self.namespace_body(ns, &path, code)
    }

    fn namespace_body(
        &self,
        ns: &NamespaceDecl,
        path: &[String],
        code: &mut CodeBuilder,
    ) -> Result<(), CompileError> {
        for decl in &ns.decls {
            match decl {
                Decl::Namespace(inner) => self.namespace(inner, path, code)?,
                Decl::Type(ty) => self.type_decl(ty, path, code)?,
                Decl::Binding(binding) => {
                    self.block(&binding.block, false, code)?;
                    let publish = binding.public
                        || (path.is_empty() && self.options.publish_root_bindings);
                    self.save_pattern(
                        &binding.pattern,
                        publish.then_some(path),
                        binding.block.expr.line(),
                        code,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn type_decl(
        &self,
        ty: &TypeDecl,
        parent: &[String],
        code: &mut CodeBuilder,
    ) -> Result<(), CompileError> {
        let Some((name, prefix)) = ty.name.parts.split_last() else {
            return Ok(());
        };
        let path = [parent, prefix].concat();
        if !prefix.is_empty() {
            code.emit(
                ty.name.line,
                OpCode::MakeNamespace {
                    path: path.clone(),
                    public: ty.public,
                },
            );
        }

        let cases = ty
            .cases
            .iter()
            .map(|case| CaseSpec {
                name: case.name.clone(),
                arity: case.arity(),
            })
            .collect();
        code.emit(
            ty.name.line,
            OpCode::MakeType {
                name: name.clone(),
                path,
                cases,
            },
        );

        if let Some(inner) = &ty.namespace {
            self.namespace(inner, parent, code)?;
        }
        Ok(())
    }
}
