//! Shared XML documents for binding tests

#![allow(dead_code)]

/// Parallel GC young collector, parameters in non-alphabetical order
pub const SCAVENGE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<jmx-bean-assignment domain="java.lang">
  <object-name-parameters>
    <entry>
      <key>type</key>
      <value>GarbageCollector</value>
    </entry>
    <entry>
      <key>name</key>
      <value>PS Scavenge</value>
    </entry>
  </object-name-parameters>
  <attributes>
    <item>CollectionCount</item>
    <item>CollectionTime</item>
  </attributes>
</jmx-bean-assignment>
"#;

/// Same bean with the entries swapped
pub const SCAVENGE_SWAPPED_XML: &str = r#"<jmx-bean-assignment domain="java.lang">
  <object-name-parameters>
    <entry><key>name</key><value>PS Scavenge</value></entry>
    <entry><key>type</key><value>GarbageCollector</value></entry>
  </object-name-parameters>
  <attributes>
    <item>CollectionTime</item>
    <item>CollectionCount</item>
  </attributes>
</jmx-bean-assignment>
"#;

/// Unknown elements and comments the reader must skip
pub const NOISY_XML: &str = r#"<jmx-bean-assignment domain="com.example" version="2">
  <!-- sampled every 10s -->
  <description><p>Cache statistics</p></description>
  <object-name-parameters>
    <entry><key>type</key><value>Cache</value><comment>primary</comment></entry>
  </object-name-parameters>
  <attributes>
    <item><![CDATA[HitRatio]]></item>
  </attributes>
</jmx-bean-assignment>
"#;
