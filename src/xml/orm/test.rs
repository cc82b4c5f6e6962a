// Tests for mapping document reader
//
//  Copyright (C) 2014-2023 Ryan Specialty, LLC.
//
//  This file is part of TAME.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

use super::*;
use crate::xml::MappingError;
use AccessType::*;

fn read(src: &str) -> MappingResult<MappingDocument> {
    read_entity_mappings(src.as_bytes(), "/META-INF/orm.xml")
}

#[test]
fn empty_root() {
    let doc = read("<entity-mappings/>").unwrap();

    assert_eq!(MappingDocument::new("/META-INF/orm.xml"), doc);
}

#[test]
fn fails_on_invalid_root() {
    assert!(matches!(
        read("<persistence/>"),
        Err(MappingError::UnexpectedRoot("entity-mappings", _))
    ));
}

#[test]
fn document_defaults() {
    let doc = read(
        r#"<?xml version="1.0" encoding="UTF-8"?>
        <entity-mappings xmlns="http://java.sun.com/xml/ns/persistence/orm"
                         version="2.0">
          <description>ignored</description>
          <package> com.example </package>
          <schema>ignored</schema>
          <access>FIELD</access>
        </entity-mappings>"#,
    )
    .unwrap();

    assert_eq!(Some("com.example".into()), doc.package);
    assert_eq!(Some(Field), doc.access);
    assert_eq!(None, doc.unit_metadata);
}

#[test]
fn empty_package_is_none() {
    let doc = read("<entity-mappings><package/></entity-mappings>").unwrap();

    assert_eq!(None, doc.package);
}

#[test]
fn unit_metadata_complete_with_defaults() {
    let doc = read(
        r#"<entity-mappings>
          <persistence-unit-metadata>
            <description>unit</description>
            <xml-mapping-metadata-complete/>
            <persistence-unit-defaults>
              <schema>s</schema>
              <access>PROPERTY</access>
              <cascade-persist/>
            </persistence-unit-defaults>
          </persistence-unit-metadata>
        </entity-mappings>"#,
    )
    .unwrap();

    assert_eq!(
        Some(UnitMetadata {
            xml_mapping_metadata_complete: true,
            default_access: Some(Property),
        }),
        doc.unit_metadata
    );
}

#[test]
fn unit_metadata_without_completeness() {
    let doc = read(
        r#"<entity-mappings>
          <persistence-unit-metadata>
            <persistence-unit-defaults>
              <access>FIELD</access>
            </persistence-unit-defaults>
          </persistence-unit-metadata>
        </entity-mappings>"#,
    )
    .unwrap();

    assert_eq!(
        Some(UnitMetadata {
            xml_mapping_metadata_complete: false,
            default_access: Some(Field),
        }),
        doc.unit_metadata
    );
}

#[test]
fn empty_unit_metadata_is_still_present() {
    let doc = read(
        "<entity-mappings><persistence-unit-metadata/></entity-mappings>",
    )
    .unwrap();

    assert_eq!(Some(UnitMetadata::default()), doc.unit_metadata);
}

#[test]
fn class_declarations_by_kind() {
    let doc = read(
        r#"<entity-mappings>
          <mapped-superclass class="Base" access="FIELD"/>
          <entity class="Order" name="PurchaseOrder" metadata-complete="true">
            <table name="ORDERS"/>
            <attributes>
              <id name="id"><column name="ID"/></id>
              <basic name="total" access="PROPERTY"/>
              <many-to-one name="customer"/>
              <transient name="cache"/>
            </attributes>
          </entity>
          <embeddable class="org.other.Address"/>
          <entity class="Customer"/>
        </entity-mappings>"#,
    )
    .unwrap();

    assert_eq!(
        vec![
            ClassDeclaration {
                kind: DeclKind::Entity {
                    name: Some("PurchaseOrder".into())
                },
                class: "Order".into(),
                access: None,
                metadata_complete: Some(true),
                attributes: vec![
                    AttributeDecl {
                        kind: AttributeKind::Id,
                        name: "id".into(),
                        access: None,
                    },
                    AttributeDecl {
                        kind: AttributeKind::Basic,
                        name: "total".into(),
                        access: Some(Property),
                    },
                    AttributeDecl {
                        kind: AttributeKind::ManyToOne,
                        name: "customer".into(),
                        access: None,
                    },
                    AttributeDecl {
                        kind: AttributeKind::Transient,
                        name: "cache".into(),
                        access: None,
                    },
                ],
            },
            ClassDeclaration::new(DeclKind::Entity { name: None }, "Customer"),
        ],
        doc.entities
    );

    assert_eq!(
        vec![ClassDeclaration::new(
            DeclKind::Embeddable,
            "org.other.Address"
        )],
        doc.embeddables
    );

    assert_eq!(
        vec![ClassDeclaration::new(DeclKind::MappedSuperclass, "Base")
            .with_access(Field)],
        doc.mapped_superclasses
    );
}

#[test]
fn namespace_prefixes_are_ignored() {
    let doc = read(
        r#"<orm:entity-mappings xmlns:orm="http://java.sun.com/xml/ns/persistence/orm">
          <orm:package>com.example</orm:package>
          <orm:entity orm:class="A"/>
        </orm:entity-mappings>"#,
    )
    .unwrap();

    assert_eq!(Some("com.example".into()), doc.package);
    assert_eq!("A", doc.entities[0].class);
}

#[test]
fn fails_on_missing_class() {
    assert!(matches!(
        read("<entity-mappings><embeddable access=\"FIELD\"/></entity-mappings>"),
        Err(MappingError::MissingAttr(ele, "class")) if ele == "embeddable"
    ));
}

#[test]
fn fails_on_missing_member_name() {
    assert!(matches!(
        read(
            r#"<entity-mappings>
              <entity class="A"><attributes><basic/></attributes></entity>
            </entity-mappings>"#
        ),
        Err(MappingError::MissingAttr(ele, "name")) if ele == "basic"
    ));
}

#[test]
fn fails_on_invalid_access_literal() {
    assert!(matches!(
        read(r#"<entity-mappings><entity class="A" access="field"/></entity-mappings>"#),
        Err(MappingError::InvalidAccessType(lit)) if lit == "field"
    ));

    assert!(matches!(
        read("<entity-mappings><access>METHOD</access></entity-mappings>"),
        Err(MappingError::InvalidAccessType(lit)) if lit == "METHOD"
    ));
}

#[test]
fn fails_on_malformed_document() {
    assert!(matches!(
        read("<entity-mappings><entity class=\"A\"></entity-mappings>"),
        Err(MappingError::Xml(_))
    ));
}
